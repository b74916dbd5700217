//! API routes module
//!
//! Wires each domain crate to its MongoDB repositories. Everything here is
//! nested under `/api` by `axum_helpers::create_router`.

pub mod auth;
pub mod guests;
pub mod health;
pub mod payments;
pub mod reports;
pub mod reservations;
pub mod rooms;

use axum::Router;
use mongodb::Database;
use tracing::info;

use crate::state::AppState;

pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/auth", auth::router(state))
        .nest("/rooms", rooms::router(state))
        .nest("/guests", guests::router(state))
        .nest("/reservations", reservations::router(state))
        .nest("/payments", payments::router(state))
        .nest("/reports", reports::router(state))
        .merge(health::router(state.clone()))
}

/// Create the indexes of every collection the API writes to
pub async fn init_indexes(db: &Database) -> eyre::Result<()> {
    rooms::init_indexes(db).await?;
    guests::init_indexes(db).await?;
    reservations::init_indexes(db).await?;
    payments::init_indexes(db).await?;
    auth::init_indexes(db).await?;
    info!("All collection indexes created");
    Ok(())
}
