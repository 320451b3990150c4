//! Custom extractors for Axum handlers.
//!
//! This module provides reusable extractors that reduce boilerplate
//! and standardize error handling across your API.

pub mod current_user;
pub mod json_body;
pub mod uuid_path;

pub use current_user::{CurrentUser, SESSION_USER_KEY};
pub use json_body::AppJson;
pub use uuid_path::UuidPath;
