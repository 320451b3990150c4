//! MongoDB implementation of CategoryRepository

use async_trait::async_trait;
use database::mongodb::{Database, DocumentStore};
use mongodb::bson::{Document, doc};
use tracing::instrument;
use uuid::Uuid;

use crate::error::CategoryResult;
use crate::models::{Category, CategoryFilter};
use crate::repository::CategoryRepository;

/// MongoDB implementation of the CategoryRepository
pub struct MongoCategoryRepository {
    store: DocumentStore<Category>,
}

impl MongoCategoryRepository {
    /// Create a new MongoCategoryRepository
    pub fn new(db: Database) -> Self {
        Self {
            store: DocumentStore::new(&db, "categories"),
        }
    }

    /// Build a MongoDB filter document from CategoryFilter
    fn build_filter(filter: &CategoryFilter) -> Document {
        let mut doc = doc! {};

        if let Some(ref name) = filter.name {
            doc.insert("name", doc! { "$regex": name, "$options": "i" });
        }

        doc
    }
}

#[async_trait]
impl CategoryRepository for MongoCategoryRepository {
    #[instrument(skip(self, category), fields(category_name = %category.name))]
    async fn create(&self, category: Category) -> CategoryResult<Category> {
        let created = self.store.insert(category).await?;

        tracing::info!(category_id = %created.id, "Category created successfully");
        Ok(created)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> CategoryResult<Option<Category>> {
        Ok(self.store.find_by_id(id).await?)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: CategoryFilter) -> CategoryResult<Vec<Category>> {
        let categories = self.store.find(Self::build_filter(&filter), None).await?;
        Ok(categories)
    }

    #[instrument(skip(self, category))]
    async fn update(&self, category: Category) -> CategoryResult<Option<Category>> {
        let id = category.id;
        let updated = self.store.replace(id, category).await?;

        if updated.is_some() {
            tracing::info!(category_id = %id, "Category updated successfully");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> CategoryResult<bool> {
        let deleted = self.store.delete(id).await?;

        if deleted {
            tracing::info!(category_id = %id, "Category deleted successfully");
        }
        Ok(deleted)
    }
}
