use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::EventResult;
use crate::models::{Event, EventFilter};

/// Repository trait for Event persistence
///
/// This trait defines the data access interface for events.
/// Implementations can use different storage backends (MongoDB, etc.)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Create a new event
    async fn create(&self, event: Event) -> EventResult<Event>;

    /// Get an event by ID
    async fn get_by_id(&self, id: Uuid) -> EventResult<Option<Event>>;

    /// List a user's events with optional filters
    async fn list_by_user(&self, user_id: Uuid, filter: EventFilter) -> EventResult<Vec<Event>>;

    /// Find a user's events overlapping `[window_start, window_end]`
    async fn find_overlapping(
        &self,
        user_id: Uuid,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> EventResult<Vec<Event>>;

    /// Replace the stored event, returning None if it no longer exists
    async fn update(&self, event: Event) -> EventResult<Option<Event>>;

    /// Delete an event by ID, returning false if it did not exist
    async fn delete(&self, id: Uuid) -> EventResult<bool>;
}
