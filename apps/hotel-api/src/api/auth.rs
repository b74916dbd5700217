//! Auth API routes

use axum::Router;
use domain_users::{AuthState, MongoUserRepository, UserService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let service = UserService::new(MongoUserRepository::new(&state.db));
    handlers::router(AuthState::new(service, state.jwt_auth.clone()))
}

pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    MongoUserRepository::new(db)
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create user indexes: {}", e))
}
