//! HTTP handlers for Reservations API

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};
use axum_helpers::{
    JsonBody, QueryParams, UuidPath,
    errors::responses::{
        BadRequestResponse, BadRequestUuidResponse, ConflictResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use chrono::Utc;
use domain_guests::GuestRepository;
use domain_rooms::RoomRepository;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{ReservationError, ReservationResult};
use crate::models::{
    AllRooms, AvailabilityOverview, CreateReservation, Reservation, ReservationFilter,
    ReservationMessage, ReservationPage, ReservationStatus, RoomReservations, StatusUpdate,
};
use crate::repository::ReservationRepository;
use crate::service::ReservationService;

#[derive(OpenApi)]
#[openapi(
    paths(
        create_reservation,
        list_reservations,
        get_reservation,
        update_status,
        available_rooms,
        all_rooms,
        reservations_for_room
    ),
    components(
        schemas(
            Reservation, ReservationStatus, CreateReservation, StatusUpdate,
            ReservationMessage, ReservationPage, AvailabilityOverview, AllRooms,
            RoomReservations
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
        (name = "Reservations", description = "Booking and room availability endpoints")
    )
)]
pub struct ApiDoc;

type SharedService<R, M, G> = Arc<ReservationService<R, M, G>>;

pub fn router<R, M, G>(service: ReservationService<R, M, G>) -> Router
where
    R: ReservationRepository + 'static,
    M: RoomRepository + 'static,
    G: GuestRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_reservations).post(create_reservation))
        .route("/rooms/available", get(available_rooms))
        .route("/rooms/all", get(all_rooms))
        .route("/room/{room_number}", get(reservations_for_room))
        .route("/reservations/{id}/status", patch(update_status))
        .route("/{id}", get(get_reservation))
        .route("/{id}/status", patch(update_status))
        .with_state(shared_service)
}

/// Book a room
#[utoipa::path(
    post,
    path = "",
    tag = "Reservations",
    request_body = CreateReservation,
    responses(
        (status = 201, description = "Reservation created", body = ReservationMessage),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_reservation<R, M, G>(
    State(service): State<SharedService<R, M, G>>,
    JsonBody(input): JsonBody<CreateReservation>,
) -> ReservationResult<impl IntoResponse>
where
    R: ReservationRepository,
    M: RoomRepository,
    G: GuestRepository,
{
    let created = service.create_reservation(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "",
    tag = "Reservations",
    params(ReservationFilter),
    responses(
        (status = 200, description = "Page of reservations", body = ReservationPage),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_reservations<R, M, G>(
    State(service): State<SharedService<R, M, G>>,
    QueryParams(filter): QueryParams<ReservationFilter>,
) -> ReservationResult<Json<ReservationPage>>
where
    R: ReservationRepository,
    M: RoomRepository,
    G: GuestRepository,
{
    let page = service.list_reservations(filter).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Reservations",
    params(
        ("id" = Uuid, Path, description = "Reservation ID")
    ),
    responses(
        (status = 200, description = "Reservation found", body = Reservation),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_reservation<R, M, G>(
    State(service): State<SharedService<R, M, G>>,
    UuidPath(id): UuidPath,
) -> ReservationResult<Json<Reservation>>
where
    R: ReservationRepository,
    M: RoomRepository,
    G: GuestRepository,
{
    let reservation = service.get_reservation(id).await?;
    Ok(Json(reservation))
}

/// Change the status of a reservation.
///
/// Also mounted at `/reservations/{id}/status`.
#[utoipa::path(
    patch,
    path = "/{id}/status",
    tag = "Reservations",
    params(
        ("id" = Uuid, Path, description = "Reservation ID")
    ),
    request_body = StatusUpdate,
    responses(
        (status = 200, description = "Status updated", body = ReservationMessage),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_status<R, M, G>(
    State(service): State<SharedService<R, M, G>>,
    UuidPath(id): UuidPath,
    JsonBody(input): JsonBody<StatusUpdate>,
) -> ReservationResult<Json<ReservationMessage>>
where
    R: ReservationRepository,
    M: RoomRepository,
    G: GuestRepository,
{
    let updated = service.update_status(id, input).await?;
    Ok(Json(updated))
}

/// Rooms that are free today
#[utoipa::path(
    get,
    path = "/rooms/available",
    tag = "Reservations",
    responses(
        (status = 200, description = "Free rooms and today's reservations", body = AvailabilityOverview),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn available_rooms<R, M, G>(
    State(service): State<SharedService<R, M, G>>,
) -> ReservationResult<Json<AvailabilityOverview>>
where
    R: ReservationRepository,
    M: RoomRepository,
    G: GuestRepository,
{
    let overview = service.availability_overview(Utc::now()).await?;
    Ok(Json(overview))
}

#[utoipa::path(
    get,
    path = "/rooms/all",
    tag = "Reservations",
    responses(
        (status = 200, description = "Every room", body = AllRooms),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn all_rooms<R, M, G>(
    State(service): State<SharedService<R, M, G>>,
) -> ReservationResult<Json<AllRooms>>
where
    R: ReservationRepository,
    M: RoomRepository,
    G: GuestRepository,
{
    let rooms = service.all_rooms().await?;
    Ok(Json(rooms))
}

#[utoipa::path(
    get,
    path = "/room/{roomNumber}",
    tag = "Reservations",
    params(
        ("roomNumber" = i32, Path, description = "Room number")
    ),
    responses(
        (status = 200, description = "Reservations of the room", body = RoomReservations),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn reservations_for_room<R, M, G>(
    State(service): State<SharedService<R, M, G>>,
    Path(room_number): Path<String>,
) -> ReservationResult<Json<RoomReservations>>
where
    R: ReservationRepository,
    M: RoomRepository,
    G: GuestRepository,
{
    let room_number = room_number
        .parse::<i32>()
        .map_err(|_| ReservationError::Validation("Invalid roomNumber".to_string()))?;
    let reservations = service.reservations_for_room(room_number).await?;
    Ok(Json(reservations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewReservation;
    use crate::repository::MockReservationRepository;
    use axum::body::Body;
    use axum::http::Request;
    use domain_guests::MockGuestRepository;
    use domain_rooms::{CreateRoom, MockRoomRepository, Room, RoomType};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use uuid::Uuid;

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn app(
        repository: MockReservationRepository,
        rooms: MockRoomRepository,
    ) -> Router {
        router(ReservationService::new(
            repository,
            rooms,
            MockGuestRepository::new(),
        ))
    }

    fn suite() -> Room {
        Room::new(CreateRoom {
            number: 301,
            room_type: RoomType::Suite,
            capacity: 4,
            price_per_night: 2500.0,
            description: "Vista al mar".to_string(),
            amenities: vec!["jacuzzi".to_string()],
            is_available: true,
        })
    }

    fn reservation(status: ReservationStatus) -> Reservation {
        let mut reservation = Reservation::new(NewReservation {
            guest_id: None,
            room_number: 301,
            guest_name: "Sofía Torres".to_string(),
            guest_email: "sofia@correo.mx".to_string(),
            guest_phone: "5550001111".to_string(),
            check_in: "2024-12-20T00:00:00Z".parse().unwrap(),
            check_out: "2024-12-22T00:00:00Z".parse().unwrap(),
            number_of_guests: 2,
            total_price: 5000.0,
            notes: String::new(),
        });
        reservation.status = status;
        reservation
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_reservation_returns_201() {
        let mut rooms = MockRoomRepository::new();
        rooms
            .expect_get_by_number()
            .returning(|_| Ok(Some(suite())));
        let mut repository = MockReservationRepository::new();
        repository
            .expect_find_overlapping()
            .returning(|_, _, _, _| Ok(None));
        repository
            .expect_create()
            .returning(|r| Ok(Reservation::new(r)));

        let response = app(repository, rooms)
            .oneshot(json_request(
                "POST",
                "/",
                json!({
                    "roomNumber": 301,
                    "checkIn": "2024-12-20",
                    "checkOut": "2024-12-22",
                    "guestName": "Sofía Torres",
                    "guestEmail": "sofia@correo.mx",
                    "guestPhone": "5550001111",
                    "numberOfGuests": 2
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["message"], "Reservation created successfully");
        assert_eq!(body["reservation"]["totalPrice"], 5000.0);
        assert_eq!(body["reservation"]["balanceDue"], 5000.0);
        assert_eq!(body["reservation"]["status"], "pending");
        assert_eq!(body["reservation"]["checkIn"], "2024-12-20T00:00:00.000Z");
    }

    #[tokio::test]
    async fn test_create_reservation_invalid_dates_returns_400() {
        let response = app(MockReservationRepository::new(), MockRoomRepository::new())
            .oneshot(json_request(
                "POST",
                "/",
                json!({
                    "roomNumber": 301,
                    "checkIn": "2024-12-22",
                    "checkOut": "2024-12-20"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["message"], "Invalid check-in and check-out dates");
    }

    #[tokio::test]
    async fn test_create_reservation_overlap_returns_409() {
        let mut rooms = MockRoomRepository::new();
        rooms
            .expect_get_by_number()
            .returning(|_| Ok(Some(suite())));
        let mut repository = MockReservationRepository::new();
        repository
            .expect_find_overlapping()
            .returning(|_, _, _, _| Ok(Some(reservation(ReservationStatus::Confirmed))));

        let response = app(repository, rooms)
            .oneshot(json_request(
                "POST",
                "/",
                json!({
                    "roomNumber": 301,
                    "checkIn": "2024-12-21",
                    "checkOut": "2024-12-23",
                    "guestName": "Otro",
                    "guestEmail": "otro@correo.mx",
                    "guestPhone": "5550002222"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = json_body(response).await;
        assert_eq!(body["message"], "Room is already booked for those dates");
    }

    #[tokio::test]
    async fn test_create_reservation_missing_room_returns_404() {
        let mut rooms = MockRoomRepository::new();
        rooms.expect_get_by_number().returning(|_| Ok(None));

        let response = app(MockReservationRepository::new(), rooms)
            .oneshot(json_request(
                "POST",
                "/",
                json!({
                    "roomNumber": 999,
                    "checkIn": "2024-12-20",
                    "checkOut": "2024-12-21"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["message"], "Room does not exist");
    }

    #[tokio::test]
    async fn test_update_status_on_both_paths() {
        for prefix in ["", "/reservations"] {
            let current = reservation(ReservationStatus::CheckedIn);
            let id = current.id;
            let mut updated = current.clone();
            updated.status = ReservationStatus::CheckedOut;

            let mut repository = MockReservationRepository::new();
            repository
                .expect_get_by_id()
                .returning(move |_| Ok(Some(current.clone())));
            repository
                .expect_update_status()
                .returning(move |_, _| Ok(Some(updated.clone())));
            let mut rooms = MockRoomRepository::new();
            rooms
                .expect_set_availability_by_number()
                .returning(|_, _| Ok(true));

            let response = app(repository, rooms)
                .oneshot(json_request(
                    "PATCH",
                    &format!("{prefix}/{id}/status"),
                    json!({ "status": "checked-out" }),
                ))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            let body = json_body(response).await;
            assert_eq!(body["reservation"]["status"], "checked-out");
            assert_eq!(body["message"], "Reservation status updated successfully");
        }
    }

    #[tokio::test]
    async fn test_update_status_invalid_returns_400() {
        let response = app(MockReservationRepository::new(), MockRoomRepository::new())
            .oneshot(json_request(
                "PATCH",
                &format!("/{}/status", Uuid::now_v7()),
                json!({ "status": "lost" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["message"], "Invalid status");
    }

    #[tokio::test]
    async fn test_get_reservation_not_found() {
        let mut repository = MockReservationRepository::new();
        repository.expect_get_by_id().returning(|_| Ok(None));

        let response = app(repository, MockRoomRepository::new())
            .oneshot(
                Request::builder()
                    .uri(format!("/{}", Uuid::now_v7()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["message"], "Reservation not found");
    }

    #[tokio::test]
    async fn test_available_rooms_shape() {
        let mut repository = MockReservationRepository::new();
        repository
            .expect_find_active_between()
            .returning(|_, _| Ok(vec![]));
        let mut rooms = MockRoomRepository::new();
        rooms
            .expect_list_excluding_numbers()
            .returning(|_| Ok(vec![suite()]));

        let response = app(repository, rooms)
            .oneshot(
                Request::builder()
                    .uri("/rooms/available")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["availableRooms"][0]["number"], 301);
        assert_eq!(body["reservedRooms"], json!([]));
    }

    #[tokio::test]
    async fn test_all_rooms_shape() {
        let mut rooms = MockRoomRepository::new();
        rooms.expect_list().returning(|| Ok(vec![suite()]));

        let response = app(MockReservationRepository::new(), rooms)
            .oneshot(
                Request::builder()
                    .uri("/rooms/all")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["allRooms"][0]["type"], "suite");
    }

    #[tokio::test]
    async fn test_reservations_for_room() {
        let mut repository = MockReservationRepository::new();
        repository
            .expect_list_by_room()
            .with(mockall::predicate::eq(301))
            .returning(|_| Ok(vec![reservation(ReservationStatus::Pending)]));

        let response = app(repository, MockRoomRepository::new())
            .oneshot(
                Request::builder()
                    .uri("/room/301")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["reservations"][0]["roomNumber"], 301);
    }

    #[tokio::test]
    async fn test_reservations_for_room_rejects_non_numeric() {
        let response = app(MockReservationRepository::new(), MockRoomRepository::new())
            .oneshot(
                Request::builder()
                    .uri("/room/abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_reservations_bad_status_returns_400() {
        let response = app(MockReservationRepository::new(), MockRoomRepository::new())
            .oneshot(
                Request::builder()
                    .uri("/?status=unknown")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
