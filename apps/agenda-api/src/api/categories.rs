//! Categories API routes
//!
//! This module wires the categories domain to HTTP routes.

use axum::Router;
use domain_categories::{CategoryService, MongoCategoryRepository, handlers};

use crate::state::AppState;

/// Create the categories router
pub fn router(state: &AppState) -> Router {
    // Create the MongoDB repository
    let repository = MongoCategoryRepository::new(state.db.clone());

    // Create the service
    let service = CategoryService::new(repository);

    // Return the domain's router
    handlers::router(service)
}
