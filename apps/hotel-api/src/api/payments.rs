//! Payments API routes

use axum::Router;
use domain_guests::MongoGuestRepository;
use domain_payments::{MongoPaymentRepository, PaymentService, handlers};
use domain_reservations::MongoReservationRepository;

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let service = PaymentService::new(
        MongoPaymentRepository::new(&state.db),
        MongoReservationRepository::new(&state.db),
        MongoGuestRepository::new(&state.db),
    );
    handlers::router(service)
}

pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    MongoPaymentRepository::new(db)
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create payment indexes: {}", e))
}
