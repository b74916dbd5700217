//! Guests API routes

use axum::Router;
use domain_guests::{GuestService, MongoGuestRepository, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let service = GuestService::new(MongoGuestRepository::new(&state.db));
    handlers::router(service)
}

pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    MongoGuestRepository::new(db)
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create guest indexes: {}", e))
}
