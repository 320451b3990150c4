use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::{FindOptions, IndexOptions};
use mongodb::{Collection, Database, IndexModel};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use mongodb::error::{ErrorKind, WriteFailure};

/// Error type for document store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Duplicate key")]
    DuplicateKey,

    #[error("MongoDB driver error: {0}")]
    Driver(#[source] mongodb::error::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(we)) if we.code == 11000
    )
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        if is_duplicate_key(&err) {
            return StoreError::DuplicateKey;
        }
        if matches!(err.kind.as_ref(), ErrorKind::ServerSelection { .. }) {
            return StoreError::Connection(err.to_string());
        }
        StoreError::Driver(err)
    }
}

/// Typed gateway over a single MongoDB collection
///
/// Documents are keyed by a UUID stored as a hyphenated string in `_id`.
/// Repositories own the collection name and the entity type; this type owns
/// the driver calls and error classification.
///
/// # Example
/// ```ignore
/// use database::mongodb::DocumentStore;
///
/// let store: DocumentStore<User> = DocumentStore::new(&db, "users");
/// let user = store.insert(user).await?;
/// ```
#[derive(Debug, Clone)]
pub struct DocumentStore<T: Send + Sync> {
    collection: Collection<T>,
    name: &'static str,
}

impl<T> DocumentStore<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + Unpin,
{
    pub fn new(db: &Database, name: &'static str) -> Self {
        Self {
            collection: db.collection::<T>(name),
            name,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Insert a document, returning it unchanged on success
    pub async fn insert(&self, document: T) -> StoreResult<T> {
        self.collection.insert_one(&document).await?;
        Ok(document)
    }

    pub async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<T>> {
        let found = self
            .collection
            .find_one(doc! { "_id": id.to_string() })
            .await?;
        Ok(found)
    }

    pub async fn find_one(&self, filter: Document) -> StoreResult<Option<T>> {
        Ok(self.collection.find_one(filter).await?)
    }

    /// Find all documents matching the filter
    pub async fn find(
        &self,
        filter: Document,
        options: impl Into<Option<FindOptions>>,
    ) -> StoreResult<Vec<T>> {
        let cursor = self.collection.find(filter).with_options(options).await?;
        let documents = cursor.try_collect().await?;
        Ok(documents)
    }

    /// Replace the document with the given id
    ///
    /// Returns the replacement when a document matched, None otherwise.
    pub async fn replace(&self, id: Uuid, document: T) -> StoreResult<Option<T>> {
        let result = self
            .collection
            .replace_one(doc! { "_id": id.to_string() }, &document)
            .await?;
        if result.matched_count > 0 {
            Ok(Some(document))
        } else {
            Ok(None)
        }
    }

    /// Delete the document with the given id
    ///
    /// Returns true when a document was removed, false when none matched.
    pub async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id.to_string() })
            .await?;
        Ok(result.deleted_count > 0)
    }

    pub async fn count(&self, filter: Document) -> StoreResult<u64> {
        Ok(self.collection.count_documents(filter).await?)
    }

    /// Create a unique index on a single field
    pub async fn create_unique_index(&self, field: &str) -> StoreResult<()> {
        let mut keys = Document::new();
        keys.insert(field, 1);

        let options = IndexOptions::builder().unique(true).build();
        let model = IndexModel::builder().keys(keys).options(options).build();

        self.collection.create_index(model).await?;
        debug!(collection = self.name, field, "ensured unique index");
        Ok(())
    }
}
