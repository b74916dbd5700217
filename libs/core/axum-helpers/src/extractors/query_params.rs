//! Query string extractor with the standard error body.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

/// Like `axum::extract::Query`, but a malformed query string is answered with
/// a JSON `BAD_REQUEST` body instead of axum's plain text.
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(params)| QueryParams(params))
            .map_err(|e| AppError::BadRequest(e.body_text()).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Window {
        nights: Option<u32>,
    }

    async fn nights(QueryParams(window): QueryParams<Window>) -> String {
        window.nights.unwrap_or_default().to_string()
    }

    fn get_uri(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_query_params_parse() {
        let response = Router::new()
            .route("/", get(nights))
            .oneshot(get_uri("/?nights=3"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_query_params_rejection_uses_error_body() {
        let response = Router::new()
            .route("/", get(nights))
            .oneshot(get_uri("/?nights=many"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "BAD_REQUEST");
        assert!(json["message"].as_str().unwrap().contains("nights"));
    }
}
