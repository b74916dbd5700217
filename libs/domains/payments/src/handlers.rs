//! HTTP handlers for Payments API

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use axum_helpers::{
    JsonBody, QueryParams, UuidPath,
    errors::responses::{
        BadRequestResponse, BadRequestUuidResponse, ConflictResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use domain_guests::GuestRepository;
use domain_reservations::ReservationRepository;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::PaymentResult;
use crate::models::{
    GuestSummary, Payment, PaymentDetails, PaymentFilter, PaymentMethod, PaymentPage,
    PaymentRegistered, RegisterPayment, ReservationPayments, ReservationSummary,
};
use crate::repository::PaymentRepository;
use crate::service::PaymentService;

#[derive(OpenApi)]
#[openapi(
    paths(register_payment, list_payments, get_payment, payments_for_reservation),
    components(
        schemas(
            Payment, PaymentMethod, PaymentDetails, ReservationSummary, GuestSummary,
            RegisterPayment, PaymentRegistered, PaymentPage, ReservationPayments
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
        (name = "Payments", description = "Payment registration and history endpoints")
    )
)]
pub struct ApiDoc;

type SharedService<P, V, G> = Arc<PaymentService<P, V, G>>;

pub fn router<P, V, G>(service: PaymentService<P, V, G>) -> Router
where
    P: PaymentRepository + 'static,
    V: ReservationRepository + 'static,
    G: GuestRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_payments).post(register_payment))
        .route("/reservation/{reservation_id}", get(payments_for_reservation))
        .route("/{id}", get(get_payment))
        .with_state(shared_service)
}

/// Register a payment against a reservation
#[utoipa::path(
    post,
    path = "",
    tag = "Payments",
    request_body = RegisterPayment,
    responses(
        (status = 201, description = "Payment registered", body = PaymentRegistered),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register_payment<P, V, G>(
    State(service): State<SharedService<P, V, G>>,
    JsonBody(input): JsonBody<RegisterPayment>,
) -> PaymentResult<impl IntoResponse>
where
    P: PaymentRepository,
    V: ReservationRepository,
    G: GuestRepository,
{
    let registered = service.register_payment(input).await?;
    Ok((StatusCode::CREATED, Json(registered)))
}

/// List payments with filters, pagination and the filtered total
#[utoipa::path(
    get,
    path = "",
    tag = "Payments",
    params(PaymentFilter),
    responses(
        (status = 200, description = "Page of payments", body = PaymentPage),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_payments<P, V, G>(
    State(service): State<SharedService<P, V, G>>,
    QueryParams(filter): QueryParams<PaymentFilter>,
) -> PaymentResult<Json<PaymentPage>>
where
    P: PaymentRepository,
    V: ReservationRepository,
    G: GuestRepository,
{
    let page = service.list_payments(filter).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Payments",
    params(
        ("id" = Uuid, Path, description = "Payment ID")
    ),
    responses(
        (status = 200, description = "Payment found", body = PaymentDetails),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_payment<P, V, G>(
    State(service): State<SharedService<P, V, G>>,
    UuidPath(id): UuidPath,
) -> PaymentResult<Json<PaymentDetails>>
where
    P: PaymentRepository,
    V: ReservationRepository,
    G: GuestRepository,
{
    let payment = service.get_payment(id).await?;
    Ok(Json(payment))
}

#[utoipa::path(
    get,
    path = "/reservation/{reservationId}",
    tag = "Payments",
    params(
        ("reservationId" = Uuid, Path, description = "Reservation ID")
    ),
    responses(
        (status = 200, description = "Payments of the reservation", body = ReservationPayments),
        (status = 400, response = BadRequestUuidResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn payments_for_reservation<P, V, G>(
    State(service): State<SharedService<P, V, G>>,
    UuidPath(reservation_id): UuidPath,
) -> PaymentResult<Json<ReservationPayments>>
where
    P: PaymentRepository,
    V: ReservationRepository,
    G: GuestRepository,
{
    let payments = service.payments_for_reservation(reservation_id).await?;
    Ok(Json(payments))
}
