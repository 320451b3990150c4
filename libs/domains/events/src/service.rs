//! Event Service - Business logic layer

use axum_helpers::collect_messages;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{EventError, EventResult};
use crate::models::{CreateEvent, Event, EventFilter, UpdateEvent};
use crate::repository::EventRepository;
use crate::window;

/// Event service providing business logic operations
///
/// Every operation acts on behalf of one user: lookups return
/// [`EventError::NotFound`] for ids that do not exist and
/// [`EventError::Forbidden`] for events owned by someone else.
pub struct EventService<R: EventRepository> {
    repository: Arc<R>,
}

impl<R: EventRepository> EventService<R> {
    /// Create a new EventService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new event owned by `user_id`
    #[instrument(skip(self, input), fields(event_title = %input.title))]
    pub async fn create_event(&self, user_id: Uuid, input: CreateEvent) -> EventResult<Event> {
        input
            .validate()
            .map_err(|e| EventError::Validation(collect_messages(&e)))?;
        check_date_order(input.start_at, input.end_at)?;

        self.repository.create(Event::new(input, user_id)).await
    }

    /// Get an event by ID, enforcing ownership
    #[instrument(skip(self))]
    pub async fn get_event(&self, user_id: Uuid, id: Uuid) -> EventResult<Event> {
        let event = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(EventError::NotFound(id))?;

        if event.user_id != user_id {
            return Err(EventError::Forbidden);
        }
        Ok(event)
    }

    /// List the user's events with optional filters
    #[instrument(skip(self))]
    pub async fn list_events(&self, user_id: Uuid, filter: EventFilter) -> EventResult<Vec<Event>> {
        self.repository.list_by_user(user_id, filter).await
    }

    /// Events touching the local calendar day `date`
    #[instrument(skip(self))]
    pub async fn events_on_day(&self, user_id: Uuid, date: NaiveDate) -> EventResult<Vec<Event>> {
        let (window_start, window_end) = window::day_window(date);
        self.repository
            .find_overlapping(user_id, window_start, window_end)
            .await
    }

    /// Events touching the window `[range_start, range_end]`
    #[instrument(skip(self))]
    pub async fn events_in_range(
        &self,
        user_id: Uuid,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> EventResult<Vec<Event>> {
        if range_end < range_start {
            return Err(EventError::Validation(vec![
                "end must not be before start".to_string(),
            ]));
        }

        self.repository
            .find_overlapping(user_id, range_start, range_end)
            .await
    }

    /// Update an event, validating the merged result
    #[instrument(skip(self, input))]
    pub async fn update_event(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: UpdateEvent,
    ) -> EventResult<Event> {
        let mut event = self.get_event(user_id, id).await?;

        event.apply_update(input);
        event
            .validate()
            .map_err(|e| EventError::Validation(collect_messages(&e)))?;
        check_date_order(event.start_at, event.end_at)?;

        self.repository
            .update(event)
            .await?
            .ok_or(EventError::NotFound(id))
    }

    /// Delete an event
    #[instrument(skip(self))]
    pub async fn delete_event(&self, user_id: Uuid, id: Uuid) -> EventResult<()> {
        self.get_event(user_id, id).await?;

        if !self.repository.delete(id).await? {
            return Err(EventError::NotFound(id));
        }

        Ok(())
    }
}

/// Reject intervals that end before they start
fn check_date_order(start_at: DateTime<Utc>, end_at: Option<DateTime<Utc>>) -> EventResult<()> {
    match end_at {
        Some(end) if end < start_at => Err(EventError::Validation(vec![
            "End date must not be before start date".to_string(),
        ])),
        _ => Ok(()),
    }
}

impl<R: EventRepository> Clone for EventService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockEventRepository;
    use chrono::TimeZone;

    fn instant(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn create_input() -> CreateEvent {
        CreateEvent {
            title: "Standup".to_string(),
            description: None,
            start_at: instant("2024-03-11T09:00:00Z"),
            end_at: Some(instant("2024-03-11T09:15:00Z")),
            location: None,
            category_id: None,
        }
    }

    fn stored_event(user_id: Uuid) -> Event {
        Event::new(create_input(), user_id)
    }

    #[tokio::test]
    async fn test_create_event_sets_owner() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_create().returning(Ok);

        let service = EventService::new(mock_repo);
        let user_id = Uuid::now_v7();

        let created = service.create_event(user_id, create_input()).await.unwrap();
        assert_eq!(created.user_id, user_id);
        assert_eq!(created.title, "Standup");
    }

    #[tokio::test]
    async fn test_create_event_rejects_empty_title() {
        // No expectations set: any repository call would panic
        let service = EventService::new(MockEventRepository::new());

        let mut input = create_input();
        input.title = String::new();

        let result = service.create_event(Uuid::now_v7(), input).await;
        assert!(matches!(result, Err(EventError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_event_rejects_end_before_start() {
        let service = EventService::new(MockEventRepository::new());

        let mut input = create_input();
        input.end_at = Some(instant("2024-03-11T08:00:00Z"));

        let result = service.create_event(Uuid::now_v7(), input).await;
        match result {
            Err(EventError::Validation(messages)) => {
                assert_eq!(messages, vec!["End date must not be before start date"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_event_allows_open_ended() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_create().returning(Ok);

        let service = EventService::new(mock_repo);

        let mut input = create_input();
        input.end_at = None;

        let created = service.create_event(Uuid::now_v7(), input).await.unwrap();
        assert!(created.end_at.is_none());
    }

    #[tokio::test]
    async fn test_get_event_missing_not_found() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));

        let service = EventService::new(mock_repo);
        let result = service.get_event(Uuid::now_v7(), Uuid::now_v7()).await;

        assert!(matches!(result, Err(EventError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_event_owned_by_someone_else_forbidden() {
        let other_owner = stored_event(Uuid::now_v7());

        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(move |_| Ok(Some(other_owner.clone())));

        let service = EventService::new(mock_repo);
        let result = service.get_event(Uuid::now_v7(), Uuid::now_v7()).await;

        assert!(matches!(result, Err(EventError::Forbidden)));
    }

    #[tokio::test]
    async fn test_events_on_day_queries_full_day_window() {
        let date: NaiveDate = "2024-03-11".parse().unwrap();
        let (expected_start, expected_end) = window::day_window(date);

        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_find_overlapping()
            .withf(move |_, start, end| *start == expected_start && *end == expected_end)
            .returning(|_, _, _| Ok(vec![]));

        let service = EventService::new(mock_repo);
        let events = service.events_on_day(Uuid::now_v7(), date).await.unwrap();
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn test_events_in_range_rejects_inverted_window() {
        let service = EventService::new(MockEventRepository::new());

        let start = Utc.with_ymd_and_hms(2024, 3, 12, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 11, 0, 0, 0).unwrap();

        let result = service.events_in_range(Uuid::now_v7(), start, end).await;
        match result {
            Err(EventError::Validation(messages)) => {
                assert_eq!(messages, vec!["end must not be before start"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_event_merges_fields() {
        let user_id = Uuid::now_v7();
        let existing = stored_event(user_id);
        let id = existing.id;

        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(mockall::predicate::eq(id))
            .returning(move |_| Ok(Some(existing.clone())));
        mock_repo.expect_update().returning(|event| Ok(Some(event)));

        let service = EventService::new(mock_repo);
        let updated = service
            .update_event(
                user_id,
                id,
                UpdateEvent {
                    location: Some("Room 2".to_string()),
                    ..UpdateEvent::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.location.as_deref(), Some("Room 2"));
        assert_eq!(updated.title, "Standup");
    }

    #[tokio::test]
    async fn test_update_event_rejects_end_before_merged_start() {
        let user_id = Uuid::now_v7();
        let existing = stored_event(user_id);
        let id = existing.id;

        // No update expectation: validation must fail before the write
        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(move |_| Ok(Some(existing.clone())));

        let service = EventService::new(mock_repo);
        let result = service
            .update_event(
                user_id,
                id,
                UpdateEvent {
                    end_at: Some(instant("2024-03-10T09:00:00Z")),
                    ..UpdateEvent::default()
                },
            )
            .await;

        assert!(matches!(result, Err(EventError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_event_owned_by_someone_else_forbidden() {
        let other_owner = stored_event(Uuid::now_v7());

        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(move |_| Ok(Some(other_owner.clone())));

        let service = EventService::new(mock_repo);
        let result = service
            .update_event(Uuid::now_v7(), Uuid::now_v7(), UpdateEvent::default())
            .await;

        assert!(matches!(result, Err(EventError::Forbidden)));
    }

    #[tokio::test]
    async fn test_delete_event_checks_ownership_first() {
        let user_id = Uuid::now_v7();
        let existing = stored_event(user_id);
        let id = existing.id;

        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        mock_repo
            .expect_delete()
            .with(mockall::predicate::eq(id))
            .returning(|_| Ok(true));

        let service = EventService::new(mock_repo);
        assert!(service.delete_event(user_id, id).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_missing_event_not_found() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));

        let service = EventService::new(mock_repo);
        let result = service.delete_event(Uuid::now_v7(), Uuid::now_v7()).await;

        assert!(matches!(result, Err(EventError::NotFound(_))));
    }
}
