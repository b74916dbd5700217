//! Application state shared by the route builders.

use axum_helpers::JwtAuth;
use mongodb::{Client, Database};

/// Everything the domain routers need to build their repositories.
///
/// Cloning is cheap: the driver client, database handle and JWT keys are all
/// reference counted.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// Shares the driver's connection pool
    pub mongo_client: Client,
    pub db: Database,
    pub jwt_auth: JwtAuth,
}
