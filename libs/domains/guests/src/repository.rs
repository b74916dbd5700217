use async_trait::async_trait;
use axum_helpers::Pagination;
use uuid::Uuid;

use crate::error::GuestResult;
use crate::models::{Guest, GuestFilter, NewGuest, UpdateGuest};

/// Repository trait for Guest persistence
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait GuestRepository: Send + Sync {
    async fn create(&self, input: NewGuest) -> GuestResult<Guest>;

    async fn get_by_id(&self, id: Uuid) -> GuestResult<Option<Guest>>;

    /// Guests for a set of ids; missing ids are skipped
    async fn get_by_ids(&self, ids: Vec<Uuid>) -> GuestResult<Vec<Guest>>;

    /// One page of guests matching the filter
    async fn list(&self, filter: GuestFilter, pagination: Pagination) -> GuestResult<Vec<Guest>>;

    async fn count(&self, filter: GuestFilter) -> GuestResult<u64>;

    async fn update(&self, id: Uuid, input: UpdateGuest) -> GuestResult<Guest>;

    /// `false` when no guest had that id
    async fn delete(&self, id: Uuid) -> GuestResult<bool>;

    /// Whether `email` belongs to a guest other than `exclude`
    async fn email_taken(&self, email: String, exclude: Option<Uuid>) -> GuestResult<bool>;
}
