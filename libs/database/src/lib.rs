//! Database library providing the MongoDB connector and document-store gateway
//!
//! This library owns everything between the domain repositories and the wire:
//! connection configuration, startup retry, health probes, and the generic
//! [`mongodb::DocumentStore`] used by every entity repository.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB connector and `DocumentStore`
//! - `config` - loading `MongoConfig` from the environment via `core_config::FromEnv`
//!
//! # Examples
//!
//! ```ignore
//! use database::mongodb::{self, DocumentStore, MongoConfig};
//! use core_config::FromEnv;
//!
//! let config = MongoConfig::from_env()?;
//! let client = mongodb::connect_from_config(&config).await?;
//! let db = client.database(config.database());
//! let store: DocumentStore<MyDoc> = DocumentStore::new(&db, "my_docs");
//! ```

// Always available modules
pub mod common;

// Database-specific modules (conditional based on features)
#[cfg(feature = "mongodb")]
pub mod mongodb;

// Re-exports for convenience
pub use common::{DatabaseError, DatabaseResult};
