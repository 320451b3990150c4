//! Readiness endpoint
//!
//! Complements the generic `/health` liveness probe with a `/ready` check
//! that verifies the MongoDB connection.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct ReadinessResponse {
    status: &'static str,
    mongodb: bool,
}

/// Create the readiness router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Readiness check - verifies the MongoDB connection
async fn readiness_check(State(state): State<AppState>) -> Json<ReadinessResponse> {
    let mongodb = database::mongodb::check_health(&state.mongo_client).await;

    Json(ReadinessResponse {
        status: if mongodb { "ready" } else { "unhealthy" },
        mongodb,
    })
}
