//! REST API test harness.
//!
//! Builds the full application (routes and middleware) over an in-memory
//! SQLite backend and wraps it in an `axum_test::TestServer`.

use std::sync::Arc;

use axum_test::TestServer;
use campus_persistence::backends::sqlite::SqliteBackend;
use campus_rest::{ServerConfig, create_app_with_shared};

/// Collection URL used throughout the tests.
pub const BASE_URL: &str = "/api/v1/courses/";

/// Returns the instance URL of a course.
pub fn course_url(id: i64) -> String {
    format!("{}{}/", BASE_URL, id)
}

/// Creates an in-memory backend with the schema applied.
pub fn create_backend() -> Arc<SqliteBackend> {
    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    backend.init_schema().expect("Failed to init schema");
    Arc::new(backend)
}

/// Creates a test server with the default testing configuration.
pub async fn create_test_server() -> (TestServer, Arc<SqliteBackend>) {
    create_test_server_with_config(ServerConfig::for_testing()).await
}

/// Creates a test server with a custom configuration.
pub async fn create_test_server_with_config(
    config: ServerConfig,
) -> (TestServer, Arc<SqliteBackend>) {
    let backend = create_backend();
    let app = create_app_with_shared(Arc::clone(&backend), config);
    let server = TestServer::new(app).expect("Failed to create test server");

    (server, backend)
}
