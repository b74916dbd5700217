use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_guests::GuestError;
use domain_rooms::RoomError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ReservationError {
    #[error("Reservation not found: {0}")]
    NotFound(Uuid),

    #[error("Room {0} does not exist")]
    RoomNotFound(i32),

    #[error("Guest not found: {0}")]
    GuestNotFound(Uuid),

    #[error("Invalid check-in and check-out dates")]
    InvalidDates,

    #[error("Invalid status")]
    InvalidStatus,

    #[error("Room {0} is already booked for those dates")]
    RoomBooked(i32),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error(transparent)]
    Room(#[from] RoomError),

    #[error(transparent)]
    Guest(#[from] GuestError),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ReservationResult<T> = Result<T, ReservationError>;

impl From<ReservationError> for AppError {
    fn from(err: ReservationError) -> Self {
        match err {
            ReservationError::NotFound(_) => {
                AppError::NotFound("Reservation not found".to_string())
            }
            ReservationError::RoomNotFound(_) => {
                AppError::NotFound("Room does not exist".to_string())
            }
            ReservationError::GuestNotFound(_) => {
                AppError::NotFound("Guest not found".to_string())
            }
            ReservationError::InvalidDates => {
                AppError::BadRequest("Invalid check-in and check-out dates".to_string())
            }
            ReservationError::InvalidStatus => AppError::BadRequest("Invalid status".to_string()),
            ReservationError::RoomBooked(_) => {
                AppError::Conflict("Room is already booked for those dates".to_string())
            }
            ReservationError::Validation(msg) => AppError::BadRequest(msg),
            ReservationError::Room(e) => e.into(),
            ReservationError::Guest(e) => e.into(),
            ReservationError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for ReservationError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ReservationError {
    fn from(err: mongodb::error::Error) -> Self {
        ReservationError::Database(err.to_string())
    }
}
