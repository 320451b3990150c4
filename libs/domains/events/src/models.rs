use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::window;

/// Calendar event entity - stored in the `events` collection
///
/// Instants are stored as integer epoch milliseconds so the overlap
/// filters can compare them numerically; clients receive
/// [`EventResponse`] with RFC 3339 timestamps instead.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Event {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub start_at: DateTime<Utc>,
    /// Absent for open-ended entries such as reminders
    #[serde(
        with = "chrono::serde::ts_milliseconds_option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub end_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Owner of the event; taken from the session, never from the body
    pub user_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new event
///
/// Timestamps arrive as RFC 3339 strings and the owner comes from the
/// authenticated session, so the body carries no `user_id`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEvent {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub description: Option<String>,
    pub start_at: DateTime<Utc>,
    pub end_at: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub category_id: Option<Uuid>,
}

/// DTO for updating an existing event
///
/// Absent fields are left unchanged; there is no way to clear a field
/// through a patch.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateEvent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub category_id: Option<Uuid>,
}

/// Query filters for listing events
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct EventFilter {
    /// Only events assigned to this category
    pub category_id: Option<Uuid>,
}

/// Query parameters for the range lookup
///
/// Bounds are kept as raw strings so the handler can report missing and
/// malformed values with field-specific messages.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct RangeQuery {
    /// Start bound, `YYYY-MM-DD` or RFC 3339
    pub start: Option<String>,
    /// End bound, `YYYY-MM-DD` or RFC 3339
    pub end: Option<String>,
}

/// Event as returned to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start_at: DateTime<Utc>,
    pub end_at: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub user_id: Uuid,
    pub category_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            title: event.title,
            description: event.description,
            start_at: event.start_at,
            end_at: event.end_at,
            location: event.location,
            user_id: event.user_id,
            category_id: event.category_id,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

impl Event {
    /// Create a new event from CreateEvent DTO, owned by `user_id`
    pub fn new(input: CreateEvent, user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            title: input.title,
            description: input.description,
            start_at: input.start_at,
            end_at: input.end_at,
            location: input.location,
            user_id,
            category_id: input.category_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates from UpdateEvent DTO
    pub fn apply_update(&mut self, update: UpdateEvent) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(start_at) = update.start_at {
            self.start_at = start_at;
        }
        if let Some(end_at) = update.end_at {
            self.end_at = Some(end_at);
        }
        if let Some(location) = update.location {
            self.location = Some(location);
        }
        if let Some(category_id) = update.category_id {
            self.category_id = Some(category_id);
        }
        self.updated_at = Utc::now();
    }

    /// True when this event touches the window `[window_start, window_end]`
    pub fn overlaps(&self, window_start: DateTime<Utc>, window_end: DateTime<Utc>) -> bool {
        window::overlaps(self.start_at, self.end_at, window_start, window_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn valid_event() -> Event {
        Event::new(
            CreateEvent {
                title: "Standup".to_string(),
                description: None,
                start_at: instant("2024-03-11T09:00:00Z"),
                end_at: Some(instant("2024-03-11T09:15:00Z")),
                location: None,
                category_id: None,
            },
            Uuid::now_v7(),
        )
    }

    #[test]
    fn test_valid_event_passes_validation() {
        assert!(valid_event().validate().is_ok());
    }

    #[test]
    fn test_empty_title_fails_validation() {
        let mut event = valid_event();
        event.title = String::new();

        let errors = event.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
    }

    #[test]
    fn test_create_dto_accepts_rfc3339() {
        let input: CreateEvent = serde_json::from_str(
            r#"{"title":"Dentist","start_at":"2024-03-11T14:00:00Z","end_at":"2024-03-11T15:30:00Z"}"#,
        )
        .unwrap();

        assert_eq!(input.start_at, Utc.with_ymd_and_hms(2024, 3, 11, 14, 0, 0).unwrap());
        assert!(input.location.is_none());
    }

    #[test]
    fn test_entity_stores_timestamps_as_millis() {
        let json = serde_json::to_value(valid_event()).unwrap();

        assert!(json["_id"].is_string());
        assert!(json["start_at"].is_i64());
        assert!(json["end_at"].is_i64());
        assert_eq!(json["start_at"].as_i64().unwrap(), 1710147600000);
    }

    #[test]
    fn test_open_ended_event_omits_end_at() {
        let mut event = valid_event();
        event.end_at = None;

        let json = serde_json::to_value(event).unwrap();
        assert!(json.get("end_at").is_none());
    }

    #[test]
    fn test_response_uses_rfc3339() {
        let json = serde_json::to_value(EventResponse::from(valid_event())).unwrap();

        assert!(json["start_at"].is_string());
        assert!(json["end_at"].is_string());
    }

    #[test]
    fn test_apply_update_merges_and_restamps() {
        let mut event = valid_event();
        let before = event.updated_at;

        event.apply_update(UpdateEvent {
            title: Some("Retro".to_string()),
            location: Some("Room 2".to_string()),
            ..UpdateEvent::default()
        });

        assert_eq!(event.title, "Retro");
        assert_eq!(event.location.as_deref(), Some("Room 2"));
        assert_eq!(event.start_at, instant("2024-03-11T09:00:00Z"));
        assert!(event.updated_at >= before);
    }

    #[test]
    fn test_empty_update_only_restamps() {
        let mut event = valid_event();
        let original = event.clone();

        event.apply_update(UpdateEvent::default());

        assert_eq!(event.title, original.title);
        assert_eq!(event.start_at, original.start_at);
        assert_eq!(event.end_at, original.end_at);
        assert!(event.updated_at >= original.updated_at);
    }
}
