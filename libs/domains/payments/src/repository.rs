use async_trait::async_trait;
use axum_helpers::Pagination;
use uuid::Uuid;

use crate::error::PaymentResult;
use crate::models::{NewPayment, Payment, PaymentCriteria};

/// Repository trait for Payment persistence
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn create(&self, input: NewPayment) -> PaymentResult<Payment>;

    async fn get_by_id(&self, id: Uuid) -> PaymentResult<Option<Payment>>;

    /// One page of payments ordered by `paidAt`
    async fn list(
        &self,
        criteria: PaymentCriteria,
        pagination: Pagination,
        ascending: bool,
    ) -> PaymentResult<Vec<Payment>>;

    async fn count(&self, criteria: PaymentCriteria) -> PaymentResult<u64>;

    /// Sum of `amount` over every payment matching `criteria`
    async fn total_amount(&self, criteria: PaymentCriteria) -> PaymentResult<f64>;

    /// Payments of a reservation, latest first
    async fn list_by_reservation(&self, reservation_id: Uuid) -> PaymentResult<Vec<Payment>>;
}
