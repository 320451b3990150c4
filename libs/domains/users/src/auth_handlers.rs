//! Session-based authentication endpoints
//!
//! Registration creates the account but does not log the user in; clients
//! call `/login` afterwards to obtain a session cookie. Logout destroys the
//! server-side session.

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{ApiResponse, AppError, AppJson, CurrentUser, ErrorBody, SESSION_USER_KEY};
use std::sync::Arc;
use tower_sessions::Session;
use utoipa::OpenApi;

use crate::models::{LoginRequest, RegisterUser, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for the auth API
#[derive(OpenApi)]
#[openapi(
    paths(register, login, logout, me),
    components(schemas(RegisterUser, LoginRequest, UserResponse, ErrorBody)),
    tags(
        (name = "Auth", description = "Registration, login and session endpoints")
    )
)]
pub struct AuthApiDoc;

/// Create the auth router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
        .with_state(shared_service)
}

/// Register a new user account
#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    request_body = RegisterUser,
    responses(
        (status = 201, description = "User registered successfully", body = UserResponse),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 409, description = "Email already in use", body = ErrorBody)
    )
)]
async fn register<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    AppJson(input): AppJson<RegisterUser>,
) -> Result<impl IntoResponse, AppError> {
    let user = service.register(input).await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::ok("User registered successfully", UserResponse::from(user)),
    ))
}

/// Log in and establish a session
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = UserResponse),
        (status = 400, description = "Malformed request body", body = ErrorBody),
        (status = 401, description = "Invalid credentials", body = ErrorBody)
    )
)]
async fn login<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    session: Session,
    AppJson(input): AppJson<LoginRequest>,
) -> Result<ApiResponse<UserResponse>, AppError> {
    let user = service
        .verify_credentials(&input.email, &input.password)
        .await?;

    session
        .insert(SESSION_USER_KEY, user.id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(user_id = %user.id, "User logged in");
    Ok(ApiResponse::ok("Login successful", UserResponse::from(user)))
}

/// Log out and destroy the session
#[utoipa::path(
    post,
    path = "/logout",
    tag = "Auth",
    responses(
        (status = 200, description = "Logout successful"),
        (status = 401, description = "Not logged in", body = ErrorBody)
    )
)]
async fn logout(
    CurrentUser(user_id): CurrentUser,
    session: Session,
) -> Result<ApiResponse<()>, AppError> {
    session
        .flush()
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(user_id = %user_id, "User logged out");
    Ok(ApiResponse::message_only("Logout successful"))
}

/// Get the profile of the logged-in user
#[utoipa::path(
    get,
    path = "/me",
    tag = "Auth",
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 401, description = "Not logged in", body = ErrorBody),
        (status = 404, description = "Account no longer exists", body = ErrorBody)
    )
)]
async fn me<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    CurrentUser(user_id): CurrentUser,
) -> Result<ApiResponse<UserResponse>, AppError> {
    let user = service.get_user(user_id).await?;
    Ok(ApiResponse::ok("User profile", UserResponse::from(user)))
}
