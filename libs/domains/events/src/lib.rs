//! Events Domain
//!
//! This module provides a complete domain implementation for calendar events.
//!
//! # Features
//!
//! - Event CRUD operations, scoped to the owning user
//! - Day and range lookups built on one interval-overlap predicate
//! - Open-ended events (no `end_at`) that only match through their start
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, validation, ownership
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs and the overlap window math
//! └─────────────┘
//! ```
//!
//! The overlap rule lives in [`window`] as plain functions over instants,
//! so the day/range semantics can be tested without a running MongoDB;
//! [`mongodb::MongoEventRepository`] translates the same three clauses
//! into a filter document.

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;
pub mod window;

// Re-export commonly used types
pub use error::{EventError, EventResult};
pub use handlers::ApiDoc;
pub use models::{CreateEvent, Event, EventFilter, EventResponse, RangeQuery, UpdateEvent};
pub use mongodb::MongoEventRepository;
pub use repository::EventRepository;
pub use service::EventService;
pub use window::{day_window, overlaps};
