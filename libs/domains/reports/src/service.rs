//! Report Service - monthly occupancy, income and cancellations

use chrono::{DateTime, Utc};
use domain_reservations::ReservationStatus;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{ReportError, ReportResult};
use crate::models::{
    Cancellations, Income, MonthlyReport, Occupancy, ReportPeriod, ReportQuery, month_window,
    percentage,
};
use crate::repository::ReportRepository;

pub struct ReportService<R: ReportRepository> {
    repository: Arc<R>,
}

impl<R: ReportRepository> ReportService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Report for the month named by `query`, defaulting to the month of `now`
    #[instrument(skip(self))]
    pub async fn monthly_report(
        &self,
        query: ReportQuery,
        now: DateTime<Utc>,
    ) -> ReportResult<MonthlyReport> {
        let (year, month) = query.period(now)?;
        let window = month_window(year, month)
            .ok_or_else(|| ReportError::InvalidPeriod("The 'year' parameter is invalid".to_string()))?;

        let rooms_count = self.repository.count_rooms().await?;
        let stays = self
            .repository
            .booked_stays(window.start, window.end)
            .await?;
        let total_nights_booked: i64 = stays.iter().map(|s| s.nights_within(&window)).sum();
        let total_room_nights_available = rooms_count * u64::from(window.days);

        let by_room = self
            .repository
            .income_by_room(window.start, window.end)
            .await?;
        let total_income = domain_reservations::round_cents(
            by_room.iter().map(|room| room.total_income).sum(),
        );

        let total_reservations = self
            .repository
            .count_check_ins(window.start, window.end, None)
            .await?;
        let cancelled_reservations = self
            .repository
            .count_check_ins(window.start, window.end, Some(ReservationStatus::Cancelled))
            .await?;

        tracing::debug!(year, month, rooms_count, total_nights_booked, "Monthly report built");

        Ok(MonthlyReport {
            period: ReportPeriod::new(year, month, &window),
            occupancy: Occupancy {
                rooms_count,
                total_room_nights_available,
                total_nights_booked,
                occupancy_rate: percentage(
                    total_nights_booked as f64,
                    total_room_nights_available as f64,
                ),
            },
            income: Income {
                total_income,
                by_room,
            },
            cancellations: Cancellations {
                total_reservations,
                cancelled_reservations,
                cancellation_rate: percentage(
                    cancelled_reservations as f64,
                    total_reservations as f64,
                ),
            },
        })
    }
}
