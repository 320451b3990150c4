//! # Axum Helpers
//!
//! A collection of utilities, middleware, and helpers for building Axum web applications.
//!
//! ## Modules
//!
//! - **[`server`]**: Server setup, health checks, graceful shutdown
//! - **[`session`]**: Cookie session layer for login state
//! - **[`http`]**: HTTP middleware (CORS, security headers)
//! - **[`errors`]**: Response envelopes and structured error codes
//! - **[`extractors`]**: Custom extractors (current user, JSON body, UUID path)
//! - **[`validation`]**: Helpers for flattening `validator` errors
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_app, create_router};
//! use axum_helpers::session::create_session_layer;
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_routes = Router::new(); // Add your routes
//!     let router = create_router::<ApiDoc>(api_routes)
//!         .await?
//!         .layer(create_session_layer(false));
//!
//!     let config = ServerConfig::default();
//!     create_app(router, &config).await?;
//!     Ok(())
//! }
//! ```

// Domain modules
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;
pub mod session;
pub mod validation;

// Re-export server types
pub use server::{
    CleanupCoordinator, HealthCheckFuture, HealthResponse, ShutdownCoordinator, close_mongo,
    create_app, create_production_app, create_router, health_router, run_health_checks,
    shutdown_signal,
};

// Re-export session layer
pub use session::create_session_layer;

// Re-export HTTP middleware
pub use http::{cors_layer_from_env, create_cors_layer, create_permissive_cors_layer, security_headers};

// Re-export error types
pub use errors::{ApiResponse, AppError, ErrorBody, ErrorCode};

// Re-export extractors
pub use extractors::{AppJson, CurrentUser, SESSION_USER_KEY, UuidPath};

// Re-export validation helpers
pub use validation::collect_messages;
