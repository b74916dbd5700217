//! Reservations API routes
//!
//! The service reads rooms and guests directly, so it gets its own
//! repositories over the same database handle.

use axum::Router;
use domain_guests::MongoGuestRepository;
use domain_reservations::{MongoReservationRepository, ReservationService, handlers};
use domain_rooms::MongoRoomRepository;

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let service = ReservationService::new(
        MongoReservationRepository::new(&state.db),
        MongoRoomRepository::new(&state.db),
        MongoGuestRepository::new(&state.db),
    );
    handlers::router(service)
}

pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    MongoReservationRepository::new(db)
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create reservation indexes: {}", e))
}
