pub mod codes;
pub mod handlers;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Standard success envelope.
///
/// Every successful endpoint returns this structure:
/// - `success`: always true
/// - `message`: human-readable summary of the outcome
/// - `data`: the payload, omitted when there is none
///
/// # JSON Example
///
/// ```json
/// {
///   "success": true,
///   "message": "Event created",
///   "data": { "id": "0191d2..." }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Always true for success responses
    pub success: bool,
    /// Human-readable outcome message
    pub message: String,
    /// Response payload, omitted when empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Success envelope with no payload, e.g. logout or password change.
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Standard error envelope.
///
/// Every failed endpoint returns this structure:
/// - `success`: always false
/// - `message`: human-readable error message
/// - `error`: machine-readable error code (see [`ErrorCode`])
/// - `errors`: per-field validation messages, omitted otherwise
///
/// # JSON Example
///
/// ```json
/// {
///   "success": false,
///   "message": "Validation failed",
///   "error": "VALIDATION_ERROR",
///   "errors": ["title must not be empty"]
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Always false for error responses
    pub success: bool,
    /// Human-readable error message
    pub message: String,
    /// Machine-readable error identifier for programmatic handling
    pub error: String,
    /// Individual validation messages, omitted for non-validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl ErrorBody {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: code.as_str().to_string(),
            errors: None,
        }
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = Some(errors);
        self
    }
}

/// Application error type that converts to HTTP responses.
///
/// Domain crates map their own error enums into this type; handlers then
/// bubble it up with `?`. Every variant renders the standard error envelope.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("validation failed")]
    Validation(Vec<String>),

    #[error("JSON extraction error: {0}")]
    JsonRejection(#[from] JsonRejection),

    #[error("authentication required")]
    Unauthorized,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("access denied")]
    Forbidden,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("email already in use")]
    EmailInUse,

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message, errors) = match self {
            AppError::Validation(errors) => {
                tracing::info!(?errors, "request failed validation");
                (
                    ErrorCode::ValidationError,
                    ErrorCode::ValidationError.default_message().to_string(),
                    Some(errors),
                )
            }
            AppError::JsonRejection(e) => {
                tracing::info!("JSON extraction error: {:?}", e);
                (
                    ErrorCode::ValidationError,
                    "Malformed request body".to_string(),
                    Some(vec![e.body_text()]),
                )
            }
            AppError::Unauthorized => {
                tracing::info!("unauthenticated request rejected");
                (
                    ErrorCode::Unauthorized,
                    ErrorCode::Unauthorized.default_message().to_string(),
                    None,
                )
            }
            AppError::InvalidCredentials => {
                tracing::info!("login rejected: invalid credentials");
                (
                    ErrorCode::InvalidCredentials,
                    ErrorCode::InvalidCredentials.default_message().to_string(),
                    None,
                )
            }
            AppError::Forbidden => {
                tracing::info!("request rejected: access denied");
                (
                    ErrorCode::Forbidden,
                    ErrorCode::Forbidden.default_message().to_string(),
                    None,
                )
            }
            AppError::NotFound(resource) => {
                tracing::info!("{} not found", resource);
                (ErrorCode::NotFound, format!("{resource} not found"), None)
            }
            AppError::EmailInUse => {
                tracing::info!("registration or update rejected: email in use");
                (
                    ErrorCode::EmailInUse,
                    ErrorCode::EmailInUse.default_message().to_string(),
                    None,
                )
            }
            AppError::Internal(detail) => {
                // Log the detail, never return it to the client
                tracing::error!("internal server error: {}", detail);
                (
                    ErrorCode::InternalError,
                    ErrorCode::InternalError.default_message().to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorBody {
            success: false,
            message,
            error: code.as_str().to_string(),
            errors,
        });

        (code.status(), body).into_response()
    }
}
