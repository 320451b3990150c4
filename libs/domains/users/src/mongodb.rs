//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use database::mongodb::{Database, DocumentStore};
use mongodb::bson::doc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::User;
use crate::repository::UserRepository;

/// MongoDB implementation of the UserRepository
///
/// Users live in the `users` collection, keyed by UUID with a unique
/// index on `email`. Lookups always receive normalized addresses, so the
/// filters below match exact strings.
pub struct MongoUserRepository {
    store: DocumentStore<User>,
}

impl MongoUserRepository {
    /// Create a new MongoUserRepository
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let db = client.database("agenda");
    /// let repo = MongoUserRepository::new(db);
    /// ```
    pub fn new(db: Database) -> Self {
        Self {
            store: DocumentStore::new(&db, "users"),
        }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn create(&self, user: User) -> UserResult<User> {
        let created = self.store.insert(user).await?;

        tracing::info!(user_id = %created.id, "User created successfully");
        Ok(created)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        Ok(self.store.find_by_id(id).await?)
    }

    #[instrument(skip(self, email))]
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        Ok(self.store.find_one(doc! { "email": email }).await?)
    }

    #[instrument(skip(self, email))]
    async fn email_exists(&self, email: &str) -> UserResult<bool> {
        let count = self.store.count(doc! { "email": email }).await?;
        Ok(count > 0)
    }

    #[instrument(skip(self, user))]
    async fn update(&self, user: User) -> UserResult<Option<User>> {
        let id = user.id;
        let updated = self.store.replace(id, user).await?;

        if updated.is_some() {
            tracing::info!(user_id = %id, "User updated successfully");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn ensure_indexes(&self) -> UserResult<()> {
        self.store.create_unique_index("email").await?;
        Ok(())
    }
}
