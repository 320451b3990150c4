//! Service status banner

use axum::{Router, extract::State, routing::get};
use axum_helpers::ApiResponse;
use serde_json::json;

use crate::state::AppState;

/// Create the status router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/status", get(status_banner))
        .with_state(state)
}

/// Service banner with the app name and version, wrapped in the
/// standard response envelope
async fn status_banner(State(state): State<AppState>) -> ApiResponse<serde_json::Value> {
    ApiResponse::ok(
        "Agenda API is running",
        json!({
            "name": state.config.app.name,
            "version": state.config.app.version,
            "status": "ok",
        }),
    )
}
