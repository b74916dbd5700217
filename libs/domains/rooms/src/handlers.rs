//! HTTP handlers for Rooms API

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};
use axum_helpers::{
    JsonBody, QueryParams, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestResponse, BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::RoomResult;
use crate::models::{
    AvailabilityUpdate, CreateRoom, Room, RoomDeleted, RoomSearch, RoomSearchResult, RoomType,
    UpdateRoom,
};
use crate::repository::RoomRepository;
use crate::service::RoomService;

/// OpenAPI documentation for Rooms API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_rooms,
        search_rooms,
        get_room,
        create_room,
        update_room,
        update_availability,
        delete_room,
    ),
    components(
        schemas(
            Room, RoomType, CreateRoom, UpdateRoom, AvailabilityUpdate,
            RoomSearchResult, RoomDeleted
        ),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Rooms", description = "Room inventory endpoints")
    )
)]
pub struct ApiDoc;

/// Create the rooms router
pub fn router<R: RoomRepository + 'static>(service: RoomService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_rooms).post(create_room))
        .route("/search", get(search_rooms))
        .route(
            "/{id}",
            get(get_room).put(update_room).delete(delete_room),
        )
        .route("/{id}/availability", patch(update_availability))
        .with_state(shared_service)
}

/// List all rooms ordered by number
#[utoipa::path(
    get,
    path = "",
    tag = "Rooms",
    responses(
        (status = 200, description = "All rooms", body = Vec<Room>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_rooms<R: RoomRepository>(
    State(service): State<Arc<RoomService<R>>>,
) -> RoomResult<Json<Vec<Room>>> {
    let rooms = service.list_rooms().await?;
    Ok(Json(rooms))
}

/// Search rooms by type, availability, capacity, price and amenities
#[utoipa::path(
    get,
    path = "/search",
    tag = "Rooms",
    params(RoomSearch),
    responses(
        (status = 200, description = "Matching rooms", body = RoomSearchResult),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_rooms<R: RoomRepository>(
    State(service): State<Arc<RoomService<R>>>,
    QueryParams(search): QueryParams<RoomSearch>,
) -> RoomResult<Json<RoomSearchResult>> {
    let result = service.search_rooms(search).await?;
    Ok(Json(result))
}

/// Get a room by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Rooms",
    params(
        ("id" = Uuid, Path, description = "Room ID")
    ),
    responses(
        (status = 200, description = "Room found", body = Room),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_room<R: RoomRepository>(
    State(service): State<Arc<RoomService<R>>>,
    UuidPath(id): UuidPath,
) -> RoomResult<Json<Room>> {
    let room = service.get_room(id).await?;
    Ok(Json(room))
}

/// Create a new room
#[utoipa::path(
    post,
    path = "",
    tag = "Rooms",
    request_body = CreateRoom,
    responses(
        (status = 201, description = "Room created", body = Room),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_room<R: RoomRepository>(
    State(service): State<Arc<RoomService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateRoom>,
) -> RoomResult<impl IntoResponse> {
    let room = service.create_room(input).await?;
    Ok((StatusCode::CREATED, Json(room)))
}

/// Update a room
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Rooms",
    params(
        ("id" = Uuid, Path, description = "Room ID")
    ),
    request_body = UpdateRoom,
    responses(
        (status = 200, description = "Room updated", body = Room),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_room<R: RoomRepository>(
    State(service): State<Arc<RoomService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateRoom>,
) -> RoomResult<Json<Room>> {
    let room = service.update_room(id, input).await?;
    Ok(Json(room))
}

/// Mark a room as available or unavailable
#[utoipa::path(
    patch,
    path = "/{id}/availability",
    tag = "Rooms",
    params(
        ("id" = Uuid, Path, description = "Room ID")
    ),
    request_body = AvailabilityUpdate,
    responses(
        (status = 200, description = "Availability updated", body = Room),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_availability<R: RoomRepository>(
    State(service): State<Arc<RoomService<R>>>,
    UuidPath(id): UuidPath,
    JsonBody(body): JsonBody<AvailabilityUpdate>,
) -> RoomResult<Json<Room>> {
    let room = service.set_availability(id, &body.is_available).await?;
    Ok(Json(room))
}

/// Delete a room
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Rooms",
    params(
        ("id" = Uuid, Path, description = "Room ID")
    ),
    responses(
        (status = 200, description = "Room deleted", body = RoomDeleted),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_room<R: RoomRepository>(
    State(service): State<Arc<RoomService<R>>>,
    UuidPath(id): UuidPath,
) -> RoomResult<Json<RoomDeleted>> {
    let deleted = service.delete_room(id).await?;
    Ok(Json(deleted))
}
