use async_trait::async_trait;
use axum_helpers::Pagination;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::ReservationResult;
use crate::models::{NewReservation, Reservation, ReservationCriteria, ReservationStatus};

/// Repository trait for Reservation persistence
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn create(&self, input: NewReservation) -> ReservationResult<Reservation>;

    async fn get_by_id(&self, id: Uuid) -> ReservationResult<Option<Reservation>>;

    /// Reservations for a set of ids; missing ids are skipped
    async fn get_by_ids(&self, ids: Vec<Uuid>) -> ReservationResult<Vec<Reservation>>;

    /// A blocking reservation of `room_number` that overlaps `[check_in, check_out)`,
    /// ignoring `exclude`
    async fn find_overlapping(
        &self,
        room_number: i32,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
        exclude: Option<Uuid>,
    ) -> ReservationResult<Option<Reservation>>;

    /// Blocking reservations of any room that overlap `[start, end)`
    async fn find_active_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ReservationResult<Vec<Reservation>>;

    /// Every reservation of a room, earliest check-in first
    async fn list_by_room(&self, room_number: i32) -> ReservationResult<Vec<Reservation>>;

    /// One page of reservations, latest check-in first
    async fn list(
        &self,
        criteria: ReservationCriteria,
        pagination: Pagination,
    ) -> ReservationResult<Vec<Reservation>>;

    async fn count(&self, criteria: ReservationCriteria) -> ReservationResult<u64>;

    async fn update_status(
        &self,
        id: Uuid,
        status: ReservationStatus,
    ) -> ReservationResult<Option<Reservation>>;

    /// Apply a payment to `reservation` as it was read. `None` when the stored
    /// paid total or status changed in the meantime.
    async fn apply_payment(
        &self,
        reservation: Reservation,
        amount: f64,
    ) -> ReservationResult<Option<Reservation>>;
}
