//! API routes module
//!
//! This module wires the domain routers into the HTTP surface of the Agenda API.

pub mod categories;
pub mod events;
pub mod health;
pub mod status;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
/// Note: These are nested under /api by axum_helpers::create_router
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/auth", users::auth_router(state))
        .nest("/users", users::router(state))
        .nest("/categories", categories::router(state))
        .nest("/events", events::router(state))
        .merge(status::router(state.clone()))
}
