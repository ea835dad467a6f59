//! # campus-rest - Courses REST API
//!
//! This crate serves the course collection of the Campus service over HTTP.
//! It implements listing with exact filters, retrieval, creation, partial
//! update and deletion of courses on top of the storage traits from
//! `campus-persistence`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use campus_rest::{create_app, ServerConfig};
//! use campus_persistence::backends::sqlite::SqliteBackend;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Create a storage backend
//!     let backend = SqliteBackend::open("campus.db")?;
//!     backend.init_schema()?;
//!
//!     // Create the Axum application
//!     let app = create_app(backend);
//!
//!     // Start the server
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Interaction | HTTP Method | URL Pattern |
//! |------------|-------------|-------------|
//! | list | GET | `/api/v1/courses/` |
//! | filter | GET | `/api/v1/courses/?id=[id]&name=[name]` |
//! | read | GET | `/api/v1/courses/[id]/` |
//! | create | POST | `/api/v1/courses/` |
//! | update | PATCH | `/api/v1/courses/[id]/` |
//! | delete | DELETE | `/api/v1/courses/[id]/` |
//! | health | GET | `/health`, `/_liveness`, `/_readiness` |
//!
//! Every course URL also answers without the trailing slash.
//!
//! ## Error Handling
//!
//! | HTTP Status | Body |
//! |-------------|------|
//! | 400 | `{"<field>": ["<message>", ...]}` or `{"detail": ...}` |
//! | 404 | `{"detail": "Not found."}` |
//! | 409 | `{"detail": ...}` |
//! | 413 | `{"detail": ...}` |
//! | 415 | `{"detail": ...}` |
//! | 500 | `{"detail": ...}` |
//!
//! ## Architecture
//!
//! - [`error`] - Error types and JSON error bodies
//! - [`config`] - Server configuration
//! - [`state`] - Application state (storage, configuration)
//! - [`handlers`] - HTTP request handlers for each interaction
//! - [`extractors`] - Axum extractors for bodies, path ids and filters
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderName, HeaderValue, Method, header},
};
use campus_persistence::core::CourseStorage;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// For more control, use [`create_app_with_config`].
pub fn create_app<S>(storage: S) -> Router
where
    S: CourseStorage + Send + Sync + 'static,
{
    create_app_with_config(storage, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// This function sets up the complete REST API with all handlers,
/// middleware, and configuration.
///
/// # Example
///
/// ```rust,ignore
/// use campus_rest::{create_app_with_config, ServerConfig};
/// use campus_persistence::backends::sqlite::SqliteBackend;
///
/// let backend = SqliteBackend::in_memory()?;
/// let config = ServerConfig {
///     port: 3000,
///     enable_cors: true,
///     ..Default::default()
/// };
/// let app = create_app_with_config(backend, config);
/// ```
pub fn create_app_with_config<S>(storage: S, config: ServerConfig) -> Router
where
    S: CourseStorage + Send + Sync + 'static,
{
    create_app_with_shared(Arc::new(storage), config)
}

/// Creates the Axum application around storage the caller keeps a handle to.
pub fn create_app_with_shared<S>(storage: Arc<S>, config: ServerConfig) -> Router
where
    S: CourseStorage + Send + Sync + 'static,
{
    info!(
        backend = storage.backend_name(),
        prefix = %config.courses_path(),
        "Creating REST API server"
    );

    // Create application state
    let state = AppState::new(storage, config.clone());

    // Build the router with all course routes
    let router = routing::create_routes(state);

    // Build middleware stack
    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    // The configured limit replaces axum's built-in default
    let router = router
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_body_size));

    // Add CORS if enabled
    let router = if config.enable_cors {
        let cors = build_cors_layer(&config);
        router.layer(cors)
    } else {
        router
    };

    // Apply remaining middleware
    router.layer(service_builder)
}

/// Parses a comma-separated CORS setting.
///
/// Returns `None` when the setting contains `*`, meaning any value is allowed.
/// Entries that do not parse are skipped.
fn parse_cors_list<T: FromStr>(raw: &str) -> Option<Vec<T>> {
    let entries: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect();
    if entries.contains(&"*") {
        return None;
    }
    Some(entries.into_iter().filter_map(|entry| entry.parse().ok()).collect())
}

/// CORS for browser clients of the course API. `Location` is exposed so a
/// client can follow a freshly created course.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins = parse_cors_list::<HeaderValue>(&config.cors_origins)
        .map_or_else(AllowOrigin::any, AllowOrigin::list);
    let methods = parse_cors_list::<Method>(&config.cors_methods)
        .map_or_else(AllowMethods::any, AllowMethods::list);
    let headers = parse_cors_list::<HeaderName>(&config.cors_headers)
        .map_or_else(AllowHeaders::any, AllowHeaders::list);

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(headers)
        .expose_headers([header::LOCATION])
}

/// Crates whose events follow the configured level.
const LOG_TARGETS: [&str; 3] = ["campus", "campus_rest", "campus_persistence"];

/// Builds the default filter directives for `level`.
fn log_directives(level: &str) -> String {
    LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .chain(std::iter::once("tower_http=debug".to_string()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Installs the global tracing subscriber. Call once at startup.
///
/// `RUST_LOG`, when set, replaces the directives derived from `level`.
pub fn init_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_directives(level)));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cors_list() {
        let methods: Option<Vec<Method>> = parse_cors_list("GET, PATCH,,DELETE");
        assert_eq!(
            methods,
            Some(vec![Method::GET, Method::PATCH, Method::DELETE])
        );

        let headers: Option<Vec<HeaderName>> = parse_cors_list("Content-Type,bad header");
        assert_eq!(headers, Some(vec![header::CONTENT_TYPE]));
    }

    #[test]
    fn test_parse_cors_list_wildcard() {
        assert!(parse_cors_list::<Method>("*").is_none());
        assert!(parse_cors_list::<HeaderName>("Accept, *").is_none());
    }

    #[test]
    fn test_log_directives() {
        assert_eq!(
            log_directives("warn"),
            "campus=warn,campus_rest=warn,campus_persistence=warn,tower_http=debug"
        );
    }
}
