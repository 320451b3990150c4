use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CategoryResult;
use crate::models::{Category, CategoryFilter};

/// Repository trait for Category persistence
///
/// This trait defines the data access interface for categories.
/// Implementations can use different storage backends (MongoDB, etc.)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Create a new category
    async fn create(&self, category: Category) -> CategoryResult<Category>;

    /// Get a category by ID
    async fn get_by_id(&self, id: Uuid) -> CategoryResult<Option<Category>>;

    /// List categories with optional filters
    async fn list(&self, filter: CategoryFilter) -> CategoryResult<Vec<Category>>;

    /// Replace the stored category, returning None if it no longer exists
    async fn update(&self, category: Category) -> CategoryResult<Option<Category>>;

    /// Delete a category by ID, returning false if it did not exist
    async fn delete(&self, id: Uuid) -> CategoryResult<bool>;
}
