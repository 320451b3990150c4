use axum::{
    Router,
    extract::State,
    routing::{get, post},
};
use axum_helpers::{ApiResponse, AppJson, CurrentUser, ErrorBody, UuidPath};
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{ChangePassword, UpdateUser, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for the user profile API
#[derive(OpenApi)]
#[openapi(
    paths(get_user, update_user, change_password),
    components(schemas(UserResponse, UpdateUser, ChangePassword, ErrorBody)),
    tags(
        (name = "Users", description = "User profile endpoints")
    )
)]
pub struct ApiDoc;

/// Create the users router with all HTTP endpoints
///
/// Profile routes are self-only: the path id must match the logged-in user.
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/{id}", get(get_user).put(update_user))
        .route("/{id}/change-password", post(change_password))
        .with_state(shared_service)
}

/// Get a user's profile
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 401, description = "Not logged in", body = ErrorBody),
        (status = 403, description = "Profile belongs to another user", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    CurrentUser(auth_id): CurrentUser,
    UuidPath(id): UuidPath,
) -> UserResult<ApiResponse<UserResponse>> {
    if id != auth_id {
        return Err(UserError::Forbidden);
    }

    let user = service.get_user(id).await?;
    Ok(ApiResponse::ok("User found", UserResponse::from(user)))
}

/// Update a user's profile
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated successfully", body = UserResponse),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 401, description = "Not logged in", body = ErrorBody),
        (status = 403, description = "Profile belongs to another user", body = ErrorBody),
        (status = 409, description = "Email already in use", body = ErrorBody)
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    CurrentUser(auth_id): CurrentUser,
    UuidPath(id): UuidPath,
    AppJson(input): AppJson<UpdateUser>,
) -> UserResult<ApiResponse<UserResponse>> {
    if id != auth_id {
        return Err(UserError::Forbidden);
    }

    let user = service.update_user(id, input).await?;
    Ok(ApiResponse::ok(
        "User updated successfully",
        UserResponse::from(user),
    ))
}

/// Change a user's password
#[utoipa::path(
    post,
    path = "/{id}/change-password",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = ChangePassword,
    responses(
        (status = 200, description = "Password changed successfully"),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 401, description = "Current password is wrong", body = ErrorBody),
        (status = 403, description = "Profile belongs to another user", body = ErrorBody)
    )
)]
async fn change_password<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    CurrentUser(auth_id): CurrentUser,
    UuidPath(id): UuidPath,
    AppJson(input): AppJson<ChangePassword>,
) -> UserResult<ApiResponse<()>> {
    if id != auth_id {
        return Err(UserError::Forbidden);
    }

    service.change_password(id, input).await?;
    Ok(ApiResponse::message_only("Password changed successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum_helpers::{SESSION_USER_KEY, create_session_layer};
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use tower_sessions::Session;

    use crate::models::{RegisterUser, User};
    use crate::repository::MockUserRepository;
    use crate::service::hash_password;

    fn user_fixture() -> User {
        User::new(
            RegisterUser {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                password: "secret1".to_string(),
                phone: None,
            },
            hash_password("secret1").unwrap(),
        )
    }

    /// Router with a backdoor login route so tests can mint a session cookie
    fn app(mock_repo: MockUserRepository, auth_id: Uuid) -> Router {
        Router::new()
            .nest("/api/users", router(UserService::new(mock_repo)))
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

    #[tokio::test]
    async fn test_get_own_profile() {
        let user = user_fixture();
        let user_id = user.id;

        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(move |_| Ok(Some(user.clone())));

        let app = app(mock_repo, user_id);
        let cookie = login(&app).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/users/{user_id}"))
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["email"], "alice@example.com");
        assert!(json["data"].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_other_profile_is_forbidden() {
        // No repository expectations: the handler must reject before the service runs
        let app = app(MockUserRepository::new(), Uuid::now_v7());
        let cookie = login(&app).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/users/{}", Uuid::now_v7()))
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
    async fn test_profile_requires_login() {
        let app = app(MockUserRepository::new(), Uuid::now_v7());

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/users/{}", Uuid::now_v7()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_update_own_profile() {
        let user = user_fixture();
        let user_id = user.id;

        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        mock_repo.expect_update().returning(|user| Ok(Some(user)));

        let app = app(mock_repo, user_id);
        let cookie = login(&app).await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(format!("/api/users/{user_id}"))
                    .header(header::COOKIE, cookie)
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name":"Alice Smith"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["name"], "Alice Smith");
    }

    #[tokio::test]
    async fn test_change_password_wrong_current() {
        let user = user_fixture();
        let user_id = user.id;

        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(move |_| Ok(Some(user.clone())));

        let app = app(mock_repo, user_id);
        let cookie = login(&app).await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/api/users/{user_id}/change-password"))
                    .header(header::COOKIE, cookie)
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"current_password":"nope","new_password":"brand new"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(json["error"], "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn test_malformed_id_is_rejected() {
        let app = app(MockUserRepository::new(), Uuid::now_v7());
        let cookie = login(&app).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/users/not-a-uuid")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "VALIDATION_ERROR");
    }
}
