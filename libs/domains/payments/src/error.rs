use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_guests::GuestError;
use domain_reservations::ReservationError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Payment not found: {0}")]
    NotFound(Uuid),

    #[error("Reservation not found: {0}")]
    ReservationNotFound(Uuid),

    #[error("Payments cannot be registered for cancelled reservations")]
    CancelledReservation,

    #[error("Payment amount exceeds the outstanding balance ({0})")]
    ExceedsBalance(f64),

    #[error("Reservation balance changed while registering the payment, please retry")]
    BalanceConflict,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error(transparent)]
    Reservation(#[from] ReservationError),

    #[error(transparent)]
    Guest(#[from] GuestError),

    #[error("Database error: {0}")]
    Database(String),
}

pub type PaymentResult<T> = Result<T, PaymentError>;

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::NotFound(_) => AppError::NotFound("Payment not found".to_string()),
            PaymentError::ReservationNotFound(_) => {
                AppError::NotFound("Reservation not found".to_string())
            }
            PaymentError::CancelledReservation | PaymentError::ExceedsBalance(_) => {
                AppError::BadRequest(err.to_string())
            }
            PaymentError::BalanceConflict => AppError::Conflict(err.to_string()),
            PaymentError::Validation(msg) => AppError::BadRequest(msg),
            PaymentError::Reservation(e) => e.into(),
            PaymentError::Guest(e) => e.into(),
            PaymentError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for PaymentError {
    fn from(err: mongodb::error::Error) -> Self {
        PaymentError::Database(err.to_string())
    }
}
