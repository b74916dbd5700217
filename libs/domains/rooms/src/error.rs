use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum RoomError {
    #[error("Room not found: {0}")]
    NotFound(Uuid),

    #[error("Room number {0} already exists")]
    DuplicateNumber(i32),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type RoomResult<T> = Result<T, RoomError>;

impl From<RoomError> for AppError {
    fn from(err: RoomError) -> Self {
        match err {
            RoomError::NotFound(_) => AppError::NotFound("Room not found".to_string()),
            RoomError::DuplicateNumber(number) => {
                AppError::Conflict(format!("Room number {} already exists", number))
            }
            RoomError::Validation(msg) => AppError::BadRequest(msg),
            RoomError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for RoomError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for RoomError {
    fn from(err: mongodb::error::Error) -> Self {
        RoomError::Database(err.to_string())
    }
}
