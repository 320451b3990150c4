use async_trait::async_trait;
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::User;

/// Repository trait for User persistence
///
/// This trait defines the data access interface for user accounts.
/// Implementations can use different storage backends (MongoDB, etc.)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user
    async fn create(&self, user: User) -> UserResult<User>;

    /// Get a user by ID
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// Get a user by their normalized email address
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// Check if an email address is already registered
    async fn email_exists(&self, email: &str) -> UserResult<bool>;

    /// Replace the stored user, returning None if it no longer exists
    async fn update(&self, user: User) -> UserResult<Option<User>>;

    /// Create the unique index on email
    async fn ensure_indexes(&self) -> UserResult<()>;
}
