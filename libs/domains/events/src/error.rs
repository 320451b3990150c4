use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::mongodb::StoreError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("Event not found: {0}")]
    NotFound(Uuid),

    #[error("You do not have permission to access this resource")]
    Forbidden,

    #[error("Invalid input: {0:?}")]
    Validation(Vec<String>),

    #[error("Database error: {0}")]
    Database(String),
}

pub type EventResult<T> = Result<T, EventError>;

/// Convert EventError to AppError for standardized error responses
impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::NotFound(_) => AppError::NotFound("Event"),
            EventError::Forbidden => AppError::Forbidden,
            EventError::Validation(errors) => AppError::Validation(errors),
            EventError::Database(msg) => AppError::Internal(msg),
        }
    }
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<StoreError> for EventError {
    fn from(err: StoreError) -> Self {
        EventError::Database(err.to_string())
    }
}
