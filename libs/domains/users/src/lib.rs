//! Users Domain
//!
//! This module provides a complete domain implementation for user accounts.
//!
//! # Features
//!
//! - Registration with Argon2 password hashing
//! - Session-based login, logout and `/me`
//! - Self-service profile reads and updates
//! - Password change with current-password verification
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (auth + profile)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, password hashing, validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities and DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{MongoUserRepository, UserService, auth_handlers, handlers};
//!
//! # async fn wire(db: mongodb::Database) {
//! let service = UserService::new(MongoUserRepository::new(db));
//!
//! // Separate routers for /api/auth and /api/users
//! let auth_router = auth_handlers::router(service.clone());
//! let users_router = handlers::router(service);
//! # }
//! ```

pub mod auth_handlers;
pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use auth_handlers::AuthApiDoc;
pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{ChangePassword, LoginRequest, RegisterUser, UpdateUser, User, UserResponse};
pub use mongodb::MongoUserRepository;
pub use repository::UserRepository;
pub use service::{UserService, normalize_email};
