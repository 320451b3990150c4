//! MongoDB database connector and utilities
//!
//! Provides connection management, health probes, and the generic
//! [`DocumentStore`] gateway the domain repositories are built on.

mod config;
mod connector;
mod health;
mod store;

pub use config::MongoConfig;
pub use connector::{connect, connect_from_config, connect_from_config_with_retry, MongoError};
pub use health::{check_health, check_health_detailed, HealthStatus};
pub use store::{DocumentStore, StoreError, StoreResult};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
