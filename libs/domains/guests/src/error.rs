use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum GuestError {
    #[error("Guest not found: {0}")]
    NotFound(Uuid),

    #[error("Email '{0}' is already registered")]
    DuplicateEmail(String),

    #[error("Email '{0}' is already registered to another guest")]
    EmailTaken(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type GuestResult<T> = Result<T, GuestError>;

impl From<GuestError> for AppError {
    fn from(err: GuestError) -> Self {
        match err {
            GuestError::NotFound(_) => AppError::NotFound("Guest not found".to_string()),
            GuestError::DuplicateEmail(_) => {
                AppError::Conflict("Email is already registered".to_string())
            }
            GuestError::EmailTaken(_) => {
                AppError::Conflict("Email is already registered to another guest".to_string())
            }
            GuestError::Validation(msg) => AppError::BadRequest(msg),
            GuestError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for GuestError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for GuestError {
    fn from(err: mongodb::error::Error) -> Self {
        GuestError::Database(err.to_string())
    }
}
