use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{ApiResponse, AppJson, CurrentUser, ErrorBody, UuidPath};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::{EventError, EventResult};
use crate::models::{CreateEvent, EventFilter, EventResponse, RangeQuery, UpdateEvent};
use crate::repository::EventRepository;
use crate::service::EventService;
use crate::window;

/// OpenAPI documentation for the events API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_events,
        create_event,
        events_on_day,
        events_in_range,
        get_event,
        update_event,
        delete_event
    ),
    components(schemas(EventResponse, CreateEvent, UpdateEvent, ErrorBody)),
    tags(
        (name = "Events", description = "Calendar event endpoints")
    )
)]
pub struct ApiDoc;

/// Create the events router with all HTTP endpoints
///
/// All routes require a logged-in user and only ever touch that user's
/// own events.
pub fn router<R: EventRepository + 'static>(service: EventService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/day/{date}", get(events_on_day))
        .route("/range", get(events_in_range))
        .route(
            "/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
        .with_state(shared_service)
}

/// List the current user's events, optionally filtered by category
#[utoipa::path(
    get,
    path = "",
    tag = "Events",
    params(EventFilter),
    responses(
        (status = 200, description = "Events retrieved successfully", body = Vec<EventResponse>),
        (status = 401, description = "Not logged in", body = ErrorBody)
    )
)]
async fn list_events<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    CurrentUser(user_id): CurrentUser,
    Query(filter): Query<EventFilter>,
) -> EventResult<ApiResponse<Vec<EventResponse>>> {
    let events = service.list_events(user_id, filter).await?;
    let data: Vec<EventResponse> = events.into_iter().map(Into::into).collect();

    Ok(ApiResponse::ok("Events retrieved successfully", data))
}

/// Create a new event owned by the current user
#[utoipa::path(
    post,
    path = "",
    tag = "Events",
    request_body = CreateEvent,
    responses(
        (status = 201, description = "Event created successfully", body = EventResponse),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 401, description = "Not logged in", body = ErrorBody)
    )
)]
async fn create_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    CurrentUser(user_id): CurrentUser,
    AppJson(input): AppJson<CreateEvent>,
) -> EventResult<impl IntoResponse> {
    let event = service.create_event(user_id, input).await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::ok("Event created successfully", EventResponse::from(event)),
    ))
}

/// Events touching one local calendar day
#[utoipa::path(
    get,
    path = "/day/{date}",
    tag = "Events",
    params(
        ("date" = String, Path, description = "Day to query, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Events retrieved successfully", body = Vec<EventResponse>),
        (status = 400, description = "Malformed date", body = ErrorBody),
        (status = 401, description = "Not logged in", body = ErrorBody)
    )
)]
async fn events_on_day<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    CurrentUser(user_id): CurrentUser,
    Path(date): Path<String>,
) -> EventResult<ApiResponse<Vec<EventResponse>>> {
    let date = window::parse_day(&date).ok_or_else(|| {
        EventError::Validation(vec!["date must be in YYYY-MM-DD format".to_string()])
    })?;

    let events = service.events_on_day(user_id, date).await?;
    let data: Vec<EventResponse> = events.into_iter().map(Into::into).collect();

    Ok(ApiResponse::ok("Events retrieved successfully", data))
}

/// Events touching an explicit start/end window
#[utoipa::path(
    get,
    path = "/range",
    tag = "Events",
    params(RangeQuery),
    responses(
        (status = 200, description = "Events retrieved successfully", body = Vec<EventResponse>),
        (status = 400, description = "Missing or malformed bounds", body = ErrorBody),
        (status = 401, description = "Not logged in", body = ErrorBody)
    )
)]
async fn events_in_range<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    CurrentUser(user_id): CurrentUser,
    Query(query): Query<RangeQuery>,
) -> EventResult<ApiResponse<Vec<EventResponse>>> {
    let (range_start, range_end) = parse_range_query(&query)?;

    let events = service.events_in_range(user_id, range_start, range_end).await?;
    let data: Vec<EventResponse> = events.into_iter().map(Into::into).collect();

    Ok(ApiResponse::ok("Events retrieved successfully", data))
}

/// Get one of the current user's events by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Events",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event found", body = EventResponse),
        (status = 401, description = "Not logged in", body = ErrorBody),
        (status = 403, description = "Owned by another user", body = ErrorBody),
        (status = 404, description = "Event not found", body = ErrorBody)
    )
)]
async fn get_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    CurrentUser(user_id): CurrentUser,
    UuidPath(id): UuidPath,
) -> EventResult<ApiResponse<EventResponse>> {
    let event = service.get_event(user_id, id).await?;
    Ok(ApiResponse::ok("Event found", EventResponse::from(event)))
}

/// Update one of the current user's events
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Events",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    request_body = UpdateEvent,
    responses(
        (status = 200, description = "Event updated successfully", body = EventResponse),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 401, description = "Not logged in", body = ErrorBody),
        (status = 403, description = "Owned by another user", body = ErrorBody),
        (status = 404, description = "Event not found", body = ErrorBody)
    )
)]
async fn update_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    CurrentUser(user_id): CurrentUser,
    UuidPath(id): UuidPath,
    AppJson(input): AppJson<UpdateEvent>,
) -> EventResult<ApiResponse<EventResponse>> {
    let event = service.update_event(user_id, id, input).await?;
    Ok(ApiResponse::ok(
        "Event updated successfully",
        EventResponse::from(event),
    ))
}

/// Delete one of the current user's events
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Events",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event deleted successfully"),
        (status = 401, description = "Not logged in", body = ErrorBody),
        (status = 403, description = "Owned by another user", body = ErrorBody),
        (status = 404, description = "Event not found", body = ErrorBody)
    )
)]
async fn delete_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    CurrentUser(user_id): CurrentUser,
    UuidPath(id): UuidPath,
) -> EventResult<ApiResponse<()>> {
    service.delete_event(user_id, id).await?;
    Ok(ApiResponse::message_only("Event deleted successfully"))
}

/// Resolve both range bounds, reporting every problem at once
fn parse_range_query(query: &RangeQuery) -> Result<(DateTime<Utc>, DateTime<Utc>), EventError> {
    let mut messages = Vec::new();

    let start = match query.start.as_deref() {
        None => {
            messages.push("Query parameter start is required".to_string());
            None
        }
        Some(raw) => {
            let parsed = window::parse_range_start(raw);
            if parsed.is_none() {
                messages.push("start must be a date (YYYY-MM-DD) or an RFC 3339 instant".to_string());
            }
            parsed
        }
    };

    let end = match query.end.as_deref() {
        None => {
            messages.push("Query parameter end is required".to_string());
            None
        }
        Some(raw) => {
            let parsed = window::parse_range_end(raw);
            if parsed.is_none() {
                messages.push("end must be a date (YYYY-MM-DD) or an RFC 3339 instant".to_string());
            }
            parsed
        }
    };

    match (start, end) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(EventError::Validation(messages)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, header};
    use axum::routing::post;
    use axum_helpers::{SESSION_USER_KEY, create_session_layer};
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use tower_sessions::Session;

    use crate::models::Event;
    use crate::repository::MockEventRepository;

    fn app(mock_repo: MockEventRepository, auth_id: Uuid) -> Router {
        Router::new()
            .nest("/api/events", router(EventService::new(mock_repo)))
            .route(
                "/test-login",
                post(move |session: Session| async move {
                    session.insert(SESSION_USER_KEY, auth_id).await.unwrap();
                    StatusCode::OK
                }),
            )
            .layer(create_session_layer(false))
    }

    async fn login(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/test-login")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        response
            .headers()
            .get(header::SET_COOKIE)
            .expect("login should set a session cookie")
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn sample_event(user_id: Uuid) -> Event {
        Event::new(
            CreateEvent {
                title: "Dentist".to_string(),
                description: None,
                start_at: "2024-03-11T14:00:00Z".parse().unwrap(),
                end_at: Some("2024-03-11T15:30:00Z".parse().unwrap()),
                location: None,
                category_id: None,
            },
            user_id,
        )
    }

    #[tokio::test]
    async fn test_list_requires_login() {
        let response = app(MockEventRepository::new(), Uuid::now_v7())
            .oneshot(
                Request::builder()
                    .uri("/api/events")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(json["error"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_create_event_owned_by_session_user() {
        let auth_id = Uuid::now_v7();
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_create().returning(Ok);

        let app = app(mock_repo, auth_id);
        let cookie = login(&app).await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/events")
                    .header(header::COOKIE, cookie)
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"title":"Dentist","start_at":"2024-03-11T14:00:00Z","end_at":"2024-03-11T15:30:00Z"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["title"], "Dentist");
        assert_eq!(json["data"]["user_id"], auth_id.to_string());
        // Client-facing timestamps stay RFC 3339
        assert!(json["data"]["start_at"].is_string());
    }

    #[tokio::test]
    async fn test_create_event_rejects_end_before_start() {
        let app = app(MockEventRepository::new(), Uuid::now_v7());
        let cookie = login(&app).await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/events")
                    .header(header::COOKIE, cookie)
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"title":"Dentist","start_at":"2024-03-11T14:00:00Z","end_at":"2024-03-11T13:00:00Z"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "VALIDATION_ERROR");
        assert_eq!(json["errors"][0], "End date must not be before start date");
        assert_eq!(json["errors"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_day_lookup_rejects_malformed_date() {
        let app = app(MockEventRepository::new(), Uuid::now_v7());
        let cookie = login(&app).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/events/day/11-03-2024")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "VALIDATION_ERROR");
        assert_eq!(json["errors"][0], "date must be in YYYY-MM-DD format");
    }

    #[tokio::test]
    async fn test_day_lookup_queries_day_window() {
        let auth_id = Uuid::now_v7();
        let date: chrono::NaiveDate = "2024-03-11".parse().unwrap();
        let (expected_start, expected_end) = window::day_window(date);
        let event = sample_event(auth_id);

        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_find_overlapping()
            .withf(move |user_id, start, end| {
                *user_id == auth_id && *start == expected_start && *end == expected_end
            })
            .returning(move |_, _, _| Ok(vec![event.clone()]));

        let app = app(mock_repo, auth_id);
        let cookie = login(&app).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/events/day/2024-03-11")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Events retrieved successfully");
        assert_eq!(json["data"][0]["title"], "Dentist");
    }

    #[tokio::test]
    async fn test_range_lookup_requires_both_bounds() {
        let app = app(MockEventRepository::new(), Uuid::now_v7());
        let cookie = login(&app).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/events/range?start=2024-03-11")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["errors"][0], "Query parameter end is required");
    }

    #[tokio::test]
    async fn test_range_lookup_expands_plain_dates() {
        let auth_id = Uuid::now_v7();
        let expected_start = window::day_window("2024-03-11".parse().unwrap()).0;
        let expected_end = window::day_window("2024-03-12".parse().unwrap()).1;

        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_find_overlapping()
            .withf(move |_, start, end| *start == expected_start && *end == expected_end)
            .returning(|_, _, _| Ok(vec![]));

        let app = app(mock_repo, auth_id);
        let cookie = login(&app).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/events/range?start=2024-03-11&end=2024-03-12")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_get_event_of_another_user_forbidden() {
        let stranger = sample_event(Uuid::now_v7());
        let id = stranger.id;

        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(move |_| Ok(Some(stranger.clone())));

        let app = app(mock_repo, Uuid::now_v7());
        let cookie = login(&app).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/events/{id}"))
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let json = body_json(response).await;
        assert_eq!(json["error"], "FORBIDDEN");
    }

    #[tokio::test]
    async fn test_delete_own_event() {
        let auth_id = Uuid::now_v7();
        let event = sample_event(auth_id);
        let id = event.id;

        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(move |_| Ok(Some(event.clone())));
        mock_repo.expect_delete().returning(|_| Ok(true));

        let app = app(mock_repo, auth_id);
        let cookie = login(&app).await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/events/{id}"))
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Event deleted successfully");
        assert!(json.get("data").is_none());
    }
}
