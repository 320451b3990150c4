//! MongoDB implementation of EventRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use database::mongodb::{Database, DocumentStore};
use mongodb::bson::{Document, doc};
use mongodb::options::FindOptions;
use tracing::instrument;
use uuid::Uuid;

use crate::error::EventResult;
use crate::models::{Event, EventFilter};
use crate::repository::EventRepository;

/// MongoDB implementation of the EventRepository
pub struct MongoEventRepository {
    store: DocumentStore<Event>,
}

impl MongoEventRepository {
    /// Create a new MongoEventRepository
    pub fn new(db: Database) -> Self {
        Self {
            store: DocumentStore::new(&db, "events"),
        }
    }

    /// Build a MongoDB filter document scoped to one user
    fn user_filter(user_id: Uuid, filter: &EventFilter) -> Document {
        let mut doc = doc! { "user_id": user_id.to_string() };

        if let Some(category_id) = filter.category_id {
            doc.insert("category_id", category_id.to_string());
        }

        doc
    }

    /// Build the overlap filter for `[window_start, window_end]`.
    ///
    /// Timestamps are stored as epoch milliseconds, so the window bounds
    /// compare as plain integers. The three clauses mirror
    /// [`crate::window::overlaps`]; documents without `end_at` can only
    /// match the first clause.
    fn overlap_filter(
        user_id: Uuid,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Document {
        let start = window_start.timestamp_millis();
        let end = window_end.timestamp_millis();

        doc! {
            "user_id": user_id.to_string(),
            "$or": [
                { "start_at": { "$gte": start, "$lte": end } },
                { "end_at": { "$gte": start, "$lte": end } },
                { "start_at": { "$lte": start }, "end_at": { "$gte": end } },
            ],
        }
    }

    fn sorted_by_start() -> FindOptions {
        FindOptions::builder().sort(doc! { "start_at": 1 }).build()
    }
}

#[async_trait]
impl EventRepository for MongoEventRepository {
    #[instrument(skip(self, event), fields(user_id = %event.user_id))]
    async fn create(&self, event: Event) -> EventResult<Event> {
        let created = self.store.insert(event).await?;

        tracing::info!(event_id = %created.id, "Event created successfully");
        Ok(created)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> EventResult<Option<Event>> {
        Ok(self.store.find_by_id(id).await?)
    }

    #[instrument(skip(self, filter))]
    async fn list_by_user(&self, user_id: Uuid, filter: EventFilter) -> EventResult<Vec<Event>> {
        let events = self
            .store
            .find(Self::user_filter(user_id, &filter), Self::sorted_by_start())
            .await?;
        Ok(events)
    }

    #[instrument(skip(self))]
    async fn find_overlapping(
        &self,
        user_id: Uuid,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> EventResult<Vec<Event>> {
        let filter = Self::overlap_filter(user_id, window_start, window_end);
        let events = self.store.find(filter, Self::sorted_by_start()).await?;
        Ok(events)
    }

    #[instrument(skip(self, event))]
    async fn update(&self, event: Event) -> EventResult<Option<Event>> {
        let id = event.id;
        let updated = self.store.replace(id, event).await?;

        if updated.is_some() {
            tracing::info!(event_id = %id, "Event updated successfully");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> EventResult<bool> {
        let deleted = self.store.delete(id).await?;

        if deleted {
            tracing::info!(event_id = %id, "Event deleted successfully");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_user_filter_always_scopes_by_owner() {
        let user_id = Uuid::now_v7();
        let doc = MongoEventRepository::user_filter(user_id, &EventFilter::default());

        assert_eq!(doc.get_str("user_id").unwrap(), user_id.to_string());
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_user_filter_adds_category() {
        let user_id = Uuid::now_v7();
        let category_id = Uuid::now_v7();
        let filter = EventFilter {
            category_id: Some(category_id),
        };

        let doc = MongoEventRepository::user_filter(user_id, &filter);
        assert_eq!(doc.get_str("category_id").unwrap(), category_id.to_string());
    }

    #[test]
    fn test_overlap_filter_has_three_clauses() {
        let user_id = Uuid::now_v7();
        let start = Utc.with_ymd_and_hms(2024, 3, 11, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 11, 23, 59, 59).unwrap();

        let doc = MongoEventRepository::overlap_filter(user_id, start, end);

        assert_eq!(doc.get_str("user_id").unwrap(), user_id.to_string());
        let clauses = doc.get_array("$or").unwrap();
        assert_eq!(clauses.len(), 3);

        // starts inside the window
        let starts = clauses[0].as_document().unwrap().get_document("start_at").unwrap();
        assert_eq!(starts.get_i64("$gte").unwrap(), start.timestamp_millis());
        assert_eq!(starts.get_i64("$lte").unwrap(), end.timestamp_millis());

        // ends inside the window
        let ends = clauses[1].as_document().unwrap().get_document("end_at").unwrap();
        assert_eq!(ends.get_i64("$gte").unwrap(), start.timestamp_millis());

        // covers the window entirely
        let covers = clauses[2].as_document().unwrap();
        assert_eq!(
            covers.get_document("start_at").unwrap().get_i64("$lte").unwrap(),
            start.timestamp_millis()
        );
        assert_eq!(
            covers.get_document("end_at").unwrap().get_i64("$gte").unwrap(),
            end.timestamp_millis()
        );
    }
}
