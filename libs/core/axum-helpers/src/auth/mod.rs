//! Bearer-token authentication.
//!
//! - [`JwtConfig`]: signing secret and token lifetime from the environment
//! - [`JwtAuth`]: HS256 token issuing and verification
//! - [`jwt_auth_middleware`] / [`optional_jwt_auth_middleware`]: attach
//!   [`JwtClaims`] to the request extensions
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, jwt_auth_middleware};
//! use core_config::FromEnv;
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//!
//! let protected = Router::new()
//!     .route("/me", get(handler))
//!     .layer(axum::middleware::from_fn_with_state(auth, jwt_auth_middleware));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;

pub use config::{DEFAULT_EXPIRES_IN, JwtConfig, parse_expires_in};
pub use jwt::{JwtAuth, JwtClaims};
pub use middleware::{extract_token_from_request, jwt_auth_middleware, optional_jwt_auth_middleware};
