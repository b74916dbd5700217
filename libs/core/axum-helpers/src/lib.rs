//! # Axum Helpers
//!
//! Shared building blocks for the hotel HTTP services.
//!
//! - **[`auth`]**: JWT bearer tokens and middleware
//! - **[`server`]**: router assembly, health checks, graceful shutdown
//! - **[`http`]**: CORS and security headers
//! - **[`errors`]**: structured error responses with error codes
//! - **[`extractors`]**: UUID path, validated JSON and plain JSON bodies
//! - **[`pagination`]**: lenient `page`/`limit` handling
//!
//! ```ignore
//! use axum_helpers::{create_production_app, create_router, health_router};
//!
//! let router = create_router::<ApiDoc>(api_routes).await?;
//! let app = router.merge(health_router(config.app));
//! create_production_app(app, &config.server, Duration::from_secs(30), async {}).await?;
//! ```

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod pagination;
pub mod server;

pub use auth::{
    JwtAuth, JwtClaims, JwtConfig, jwt_auth_middleware, optional_jwt_auth_middleware,
};

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_app, create_production_app,
    create_router, health_router, run_health_checks, shutdown_signal,
};

pub use http::{cors_layer_from_env, create_cors_layer, security_headers};

pub use errors::responses::{
    BadRequestResponse, BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
    InternalServerErrorResponse, NotFoundResponse, ServiceUnavailableResponse,
    UnauthorizedResponse,
};
pub use errors::{AppError, ErrorCode, ErrorResponse, error_response};

pub use extractors::{JsonBody, QueryParams, UuidPath, ValidatedJson};

pub use pagination::{Pagination, is_ascending};
