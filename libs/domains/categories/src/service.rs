//! Category Service - Business logic layer

use axum_helpers::collect_messages;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{CategoryError, CategoryResult};
use crate::models::{Category, CategoryFilter, CreateCategory, UpdateCategory};
use crate::repository::CategoryRepository;

/// Category service providing business logic operations
pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
}

impl<R: CategoryRepository> CategoryService<R> {
    /// Create a new CategoryService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new category
    #[instrument(skip(self, input), fields(category_name = %input.name))]
    pub async fn create_category(&self, input: CreateCategory) -> CategoryResult<Category> {
        input
            .validate()
            .map_err(|e| CategoryError::Validation(collect_messages(&e)))?;

        self.repository.create(Category::new(input)).await
    }

    /// Get a category by ID
    #[instrument(skip(self))]
    pub async fn get_category(&self, id: Uuid) -> CategoryResult<Category> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CategoryError::NotFound(id))
    }

    /// List categories with optional filters
    #[instrument(skip(self))]
    pub async fn list_categories(&self, filter: CategoryFilter) -> CategoryResult<Vec<Category>> {
        self.repository.list(filter).await
    }

    /// Update a category, validating the merged result
    #[instrument(skip(self, input))]
    pub async fn update_category(
        &self,
        id: Uuid,
        input: UpdateCategory,
    ) -> CategoryResult<Category> {
        let mut category = self.get_category(id).await?;

        category.apply_update(input);
        category
            .validate()
            .map_err(|e| CategoryError::Validation(collect_messages(&e)))?;

        self.repository
            .update(category)
            .await?
            .ok_or(CategoryError::NotFound(id))
    }

    /// Delete a category
    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: Uuid) -> CategoryResult<()> {
        if !self.repository.delete(id).await? {
            return Err(CategoryError::NotFound(id));
        }

        Ok(())
    }
}

impl<R: CategoryRepository> Clone for CategoryService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
