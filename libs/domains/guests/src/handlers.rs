//! HTTP handlers for Guests API

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use axum_helpers::{
    JsonBody, QueryParams, UuidPath,
    errors::responses::{
        BadRequestResponse, BadRequestUuidResponse, ConflictResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::GuestResult;
use crate::models::{
    CreateGuest, DocumentType, Guest, GuestDeleted, GuestFilter, GuestMessage, GuestPage,
    UpdateGuest,
};
use crate::repository::GuestRepository;
use crate::service::GuestService;

#[derive(OpenApi)]
#[openapi(
    paths(create_guest, list_guests, get_guest, update_guest, delete_guest),
    components(
        schemas(
            Guest, DocumentType, CreateGuest, UpdateGuest, GuestPage, GuestMessage,
            GuestDeleted
        ),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            BadRequestUuidResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Guests", description = "Guest registry endpoints")
    )
)]
pub struct ApiDoc;

pub fn router<R: GuestRepository + 'static>(service: GuestService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_guests).post(create_guest))
        .route(
            "/{id}",
            get(get_guest).put(update_guest).delete(delete_guest),
        )
        .with_state(shared_service)
}

/// Register a guest
#[utoipa::path(
    post,
    path = "",
    tag = "Guests",
    request_body = CreateGuest,
    responses(
        (status = 201, description = "Guest registered", body = GuestMessage),
        (status = 400, response = BadRequestResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_guest<R: GuestRepository>(
    State(service): State<Arc<GuestService<R>>>,
    JsonBody(input): JsonBody<CreateGuest>,
) -> GuestResult<impl IntoResponse> {
    let created = service.create_guest(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// List guests with search, filters and pagination
#[utoipa::path(
    get,
    path = "",
    tag = "Guests",
    params(GuestFilter),
    responses(
        (status = 200, description = "Page of guests", body = GuestPage),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_guests<R: GuestRepository>(
    State(service): State<Arc<GuestService<R>>>,
    QueryParams(filter): QueryParams<GuestFilter>,
) -> GuestResult<Json<GuestPage>> {
    let page = service.list_guests(filter).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Guests",
    params(
        ("id" = Uuid, Path, description = "Guest ID")
    ),
    responses(
        (status = 200, description = "Guest found", body = Guest),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_guest<R: GuestRepository>(
    State(service): State<Arc<GuestService<R>>>,
    UuidPath(id): UuidPath,
) -> GuestResult<Json<Guest>> {
    let guest = service.get_guest(id).await?;
    Ok(Json(guest))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Guests",
    params(
        ("id" = Uuid, Path, description = "Guest ID")
    ),
    request_body = UpdateGuest,
    responses(
        (status = 200, description = "Guest updated", body = GuestMessage),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_guest<R: GuestRepository>(
    State(service): State<Arc<GuestService<R>>>,
    UuidPath(id): UuidPath,
    JsonBody(input): JsonBody<UpdateGuest>,
) -> GuestResult<Json<GuestMessage>> {
    let updated = service.update_guest(id, input).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Guests",
    params(
        ("id" = Uuid, Path, description = "Guest ID")
    ),
    responses(
        (status = 200, description = "Guest deleted", body = GuestDeleted),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_guest<R: GuestRepository>(
    State(service): State<Arc<GuestService<R>>>,
    UuidPath(id): UuidPath,
) -> GuestResult<Json<GuestDeleted>> {
    let deleted = service.delete_guest(id).await?;
    Ok(Json(deleted))
}
