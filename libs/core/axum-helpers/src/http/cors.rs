use axum::http::{HeaderValue, Method, header};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Front-ends allowed when `CORS_ALLOWED_ORIGIN` is not set.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 5] = [
    "http://localhost:5173",
    "https://mi-hotel-acapulco.vercel.app",
    "http://localhost:3001",
    "https://cheerful-pavlova-cc42bf.netlify.app",
    "https://hoteles-admin-acapulco.netlify.app",
];

/// Parse a comma-separated origin list, skipping blanks and invalid values.
///
/// `None` yields [`DEFAULT_ALLOWED_ORIGINS`].
pub fn allowed_origins(raw: Option<&str>) -> Vec<HeaderValue> {
    let parsed: Vec<HeaderValue> = match raw {
        Some(list) => list
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect(),
        None => Vec::new(),
    };

    if parsed.is_empty() {
        DEFAULT_ALLOWED_ORIGINS
            .iter()
            .map(|origin| HeaderValue::from_static(origin))
            .collect()
    } else {
        parsed
    }
}

/// CORS layer for the given origins.
///
/// - Methods: GET, HEAD, POST, PUT, PATCH, DELETE, OPTIONS
/// - Headers: Content-Type, Authorization, Accept, Cookie
/// - Credentials allowed, 1 hour preflight cache
pub fn create_cors_layer(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            header::COOKIE,
        ])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

/// [`create_cors_layer`] over `CORS_ALLOWED_ORIGIN`.
pub fn cors_layer_from_env() -> CorsLayer {
    let raw = std::env::var("CORS_ALLOWED_ORIGIN").ok();
    create_cors_layer(allowed_origins(raw.as_deref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, routing::get};
    use tower::ServiceExt;

    #[test]
    fn test_allowed_origins_defaults() {
        let origins = allowed_origins(None);
        assert_eq!(origins.len(), DEFAULT_ALLOWED_ORIGINS.len());
        assert_eq!(origins[0], "http://localhost:5173");
    }

    #[test]
    fn test_allowed_origins_parses_list() {
        let origins = allowed_origins(Some(" https://a.example , ,https://b.example"));
        assert_eq!(origins, vec!["https://a.example", "https://b.example"]);
    }

    #[test]
    fn test_allowed_origins_blank_falls_back() {
        assert_eq!(allowed_origins(Some(" , ")).len(), DEFAULT_ALLOWED_ORIGINS.len());
    }

    #[tokio::test]
    async fn test_cors_layer_echoes_allowed_origin() {
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(create_cors_layer(allowed_origins(None)));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header("origin", "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "http://localhost:5173"
        );
        assert_eq!(
            response.headers().get("access-control-allow-credentials").unwrap(),
            "true"
        );
    }

    #[tokio::test]
    async fn test_cors_layer_ignores_unknown_origin() {
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(create_cors_layer(allowed_origins(None)));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header("origin", "https://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.headers().get("access-control-allow-origin").is_none());
    }
}
