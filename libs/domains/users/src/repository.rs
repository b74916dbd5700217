use async_trait::async_trait;
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::User;

/// Storage for staff accounts
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. A taken email yields `UserError::DuplicateEmail`.
    async fn create(&self, user: User) -> UserResult<User>;

    async fn find_by_email(&self, email: String) -> UserResult<Option<User>>;

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    async fn email_exists(&self, email: String) -> UserResult<bool>;
}
