//! # restcheck-sample-api - Reference Task Service
//!
//! A small task-management REST service that exercises every scenario in the
//! restcheck conformance kit. It keeps tasks in an in-memory ordered store,
//! authenticates with the kit's dummy bearer tokens, and reports failures in
//! the problem JSON shape the kit asserts on.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use restcheck_sample_api::{ServerConfig, TaskStore, create_app, init_logging};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::default();
//!     init_logging(&config.log_level);
//!
//!     let store = Arc::new(TaskStore::new());
//!     let app = create_app(store, config.clone());
//!
//!     let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Interaction | HTTP Method | URL Pattern |
//! |-------------|-------------|-------------|
//! | list | GET | `/tasks?size=N&next=cursor` |
//! | create | POST | `/tasks` |
//! | truncate | DELETE | `/tasks` |
//! | read | GET | `/tasks/{id}` |
//! | update | POST | `/tasks/{id}` |
//! | conditional update | POST | `/tasks/{id}?version=N` |
//! | upsert | PUT | `/tasks/{id}` |
//! | patch | PATCH | `/tasks/{id}` |
//! | delete | DELETE | `/tasks/{id}` |
//!
//! Every route requires a bearer token; each interaction demands the
//! `tasks:{action}` authority unless the token carries the `ROOT` role. Both
//! checks run before the request body is read.
//!
//! ## Error Handling
//!
//! All errors are returned as `application/problem+json` bodies with the
//! status mirrored in the payload:
//!
//! | HTTP Status | Title | Description |
//! |-------------|-------|-------------|
//! | 400 | Bad Request | Malformed body or query |
//! | 400 | Constraint Violation | Field rules failed, with a `violations` array |
//! | 401 | Unauthorized | Missing or undecodable token |
//! | 403 | Forbidden | Token lacks the required authority |
//! | 404 | Not Found | Unknown task id |
//! | 409 | Conflict | Duplicate id or optimistic lock failure |
//!
//! The `401` and `403` details are localized when the request prefers
//! Japanese via `Accept-Language`.
//!
//! ## Configuration
//!
//! The server is configured via environment variables:
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `RESTCHECK_PORT` | 8080 | Server port |
//! | `RESTCHECK_HOST` | 127.0.0.1 | Host to bind |
//! | `RESTCHECK_BASE_URL` | http://localhost:8080 | Base for `Location` headers |
//! | `RESTCHECK_DEFAULT_PAGE_SIZE` | 20 | List page size when unspecified |
//! | `RESTCHECK_MAX_PAGE_SIZE` | 100 | Upper bound on requested page sizes |
//! | `RESTCHECK_LOG_LEVEL` | info | Log level (error, warn, info, debug, trace) |
//!
//! ## Architecture
//!
//! - [`model`] - The task entity, request forms, and field validation
//! - [`store`] - In-memory ordered store with versioning and cursors
//! - [`error`] - Problem JSON error type
//! - [`config`] - Server configuration
//! - [`state`] - Application state (store, configuration)
//! - [`extractors`] - Bearer auth, route authority checks, and strict body
//!   and query extractors
//! - [`handlers`] - HTTP request handlers for each interaction
//! - [`routes`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod state;
pub mod store;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{ApiError, ApiResult, Violation};
pub use model::Task;
pub use state::AppState;
pub use store::TaskStore;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Creates the Axum application for the task service.
///
/// # Arguments
///
/// * `store` - The shared task store, kept outside the app so tests can
///   seed and inspect it directly
/// * `config` - Server configuration
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use restcheck_sample_api::{ServerConfig, TaskStore, create_app};
///
/// let store = Arc::new(TaskStore::new());
/// let app = create_app(store, ServerConfig::for_testing());
/// ```
pub fn create_app(store: Arc<TaskStore>, config: ServerConfig) -> Router {
    info!(base_url = %config.base_url, "Creating task service");

    let state = AppState::new(store, config);

    routes::create_routes(state).layer(TraceLayer::new_for_http())
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("restcheck_sample_api={},tower_http=debug", level))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
