use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("{0}")]
    InvalidPeriod(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ReportResult<T> = Result<T, ReportError>;

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::InvalidPeriod(msg) => AppError::BadRequest(msg),
            ReportError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for ReportError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ReportError {
    fn from(err: mongodb::error::Error) -> Self {
        ReportError::Database(err.to_string())
    }
}
