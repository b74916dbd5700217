use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain_reservations::ReservationStatus;

use crate::error::ReportResult;
use crate::models::{RoomIncome, StayWindow};

/// Read-only queries over rooms, reservations and payments
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn count_rooms(&self) -> ReportResult<u64>;

    /// Confirmed or completed stays that overlap `[start, end)`
    async fn booked_stays(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ReportResult<Vec<StayWindow>>;

    /// Payments made in `[start, end)`, grouped by room, lowest room first
    async fn income_by_room(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ReportResult<Vec<RoomIncome>>;

    /// Reservations checking in during `[start, end)`, optionally by status
    async fn count_check_ins(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        status: Option<ReservationStatus>,
    ) -> ReportResult<u64>;
}
