use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::mongodb::StoreError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(Uuid),

    #[error("Email is already in use")]
    EmailInUse,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("You do not have permission to access this resource")]
    Forbidden,

    #[error("Invalid input: {0:?}")]
    Validation(Vec<String>),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type UserResult<T> = Result<T, UserError>;

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => AppError::NotFound("User"),
            UserError::EmailInUse => AppError::EmailInUse,
            UserError::InvalidCredentials => AppError::InvalidCredentials,
            UserError::Forbidden => AppError::Forbidden,
            UserError::Validation(errors) => AppError::Validation(errors),
            UserError::PasswordHash(msg) => AppError::Internal(msg),
            UserError::Database(msg) => AppError::Internal(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        // Convert to AppError for the standardized error response format
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// A duplicate key on the unique email index means the address is taken
impl From<StoreError> for UserError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey => UserError::EmailInUse,
            other => UserError::Database(other.to_string()),
        }
    }
}
