//! Users and auth API routes
//!
//! This module wires the users domain to HTTP routes. The auth endpoints and
//! the profile endpoints mount under different prefixes but are backed by the
//! same service.

use axum::Router;
use domain_users::{MongoUserRepository, UserRepository, UserService, auth_handlers, handlers};
use tracing::info;

use crate::state::AppState;

fn service(state: &AppState) -> UserService<MongoUserRepository> {
    UserService::new(MongoUserRepository::new(state.db.clone()))
}

/// Create the auth router (register, login, logout, me)
pub fn auth_router(state: &AppState) -> Router {
    auth_handlers::router(service(state))
}

/// Create the users router (profile reads, updates, password changes)
pub fn router(state: &AppState) -> Router {
    handlers::router(service(state))
}

/// Initialize user indexes in MongoDB
pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    let repository = MongoUserRepository::new(db.clone());
    repository
        .ensure_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create user indexes: {}", e))?;
    info!("User collection indexes created");
    Ok(())
}
