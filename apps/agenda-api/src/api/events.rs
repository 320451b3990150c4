//! Events API routes
//!
//! This module wires the events domain to HTTP routes.

use axum::Router;
use domain_events::{EventService, MongoEventRepository, handlers};

use crate::state::AppState;

/// Create the events router
pub fn router(state: &AppState) -> Router {
    // Create the MongoDB repository
    let repository = MongoEventRepository::new(state.db.clone());

    // Create the service
    let service = EventService::new(repository);

    // Return the domain's router
    handlers::router(service)
}
