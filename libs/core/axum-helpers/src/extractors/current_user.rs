//! Session-backed extractor for the authenticated user.

use crate::errors::AppError;
use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;
use uuid::Uuid;

/// Session key under which the authenticated user's id is stored.
///
/// Login handlers insert the id under this key; logout flushes the session.
pub const SESSION_USER_KEY: &str = "user_id";

/// Extractor for the authenticated user's id.
///
/// Reads the user id from the request session. Requests without a session,
/// or with a session that has no logged-in user, are rejected with 401
/// before the handler body runs.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::CurrentUser;
///
/// async fn list_events(CurrentUser(user_id): CurrentUser) -> String {
///     format!("events for {}", user_id)
/// }
/// ```
pub struct CurrentUser(pub Uuid);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::Internal(msg.to_string()).into_response())?;

        let user_id: Option<Uuid> = session
            .get(SESSION_USER_KEY)
            .await
            .map_err(|e| AppError::Internal(e.to_string()).into_response())?;

        user_id
            .map(CurrentUser)
            .ok_or_else(|| AppError::Unauthorized.into_response())
    }
}
