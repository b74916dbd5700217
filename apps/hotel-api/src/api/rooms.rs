//! Rooms API routes

use axum::Router;
use domain_rooms::{MongoRoomRepository, RoomService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let service = RoomService::new(MongoRoomRepository::new(&state.db));
    handlers::router(service)
}

pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    MongoRoomRepository::new(db)
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create room indexes: {}", e))
}
