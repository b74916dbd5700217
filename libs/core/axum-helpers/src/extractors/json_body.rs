//! JSON extractor for bodies that are normalized before validation.

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

/// Like `axum::Json`, but rejections use the standard error body.
///
/// Use it when the service trims or lowercases input before validating it.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(data)| JsonBody(data))
            .map_err(|e| AppError::from(e).into_response())
    }
}
