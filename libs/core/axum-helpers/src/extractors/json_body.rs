//! JSON body extractor with envelope-shaped rejections.

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

/// JSON extractor that rejects malformed bodies with the standard envelope.
///
/// Deserialization failures (bad syntax, wrong types, missing content type)
/// become a validation error response instead of axum's plain-text rejection.
/// Field-level validation stays in the service layer.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::post;
/// use axum_helpers::extractors::AppJson;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct CreateCategory {
///     name: String,
/// }
///
/// async fn create(AppJson(payload): AppJson<CreateCategory>) -> String {
///     payload.name
/// }
///
/// let app = Router::new().route("/categories", post(create));
/// ```
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(data)) => Ok(AppJson(data)),
            Err(rejection) => Err(AppError::JsonRejection(rejection).into_response()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::post};
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Payload {
        name: String,
    }

    async fn create(AppJson(payload): AppJson<Payload>) -> String {
        payload.name
    }

    fn app() -> Router {
        Router::new().route("/things", post(create))
    }

    #[tokio::test]
    async fn test_well_formed_body_is_extracted() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/things")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name":"ok"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_malformed_body_gets_envelope() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/things")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "VALIDATION_ERROR");
    }
}
