//! Course route configuration.
//!
//! Defines all routes for the courses REST API.

use axum::{
    Router,
    routing::{MethodRouter, get},
};
use campus_persistence::core::CourseStorage;

use crate::handlers;
use crate::state::AppState;

/// Creates all REST API routes.
///
/// Every course route is registered with and without a trailing slash.
///
/// # Routes
///
/// ## System-level
/// - `GET /health` - Health check
/// - `GET /_liveness` - Liveness probe
/// - `GET /_readiness` - Readiness probe
///
/// ## Collection-level
/// - `GET [prefix]/courses/` - List, with `id` and `name` filters
/// - `POST [prefix]/courses/` - Create
///
/// ## Instance-level
/// - `GET [prefix]/courses/{id}/` - Read
/// - `PATCH [prefix]/courses/{id}/` - Partial update
/// - `DELETE [prefix]/courses/{id}/` - Delete
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: CourseStorage + Send + Sync + 'static,
{
    let collection = state.config().courses_path();
    let instance = format!("{}/{{id}}", collection);

    Router::new()
        // System-level routes
        .route("/health", get(handlers::health_handler::<S>))
        .route("/_liveness", get(handlers::liveness_handler))
        .route("/_readiness", get(handlers::readiness_handler::<S>))
        // Collection-level routes
        .route(&collection, collection_routes::<S>())
        .route(&format!("{}/", collection), collection_routes::<S>())
        // Instance-level routes
        .route(&instance, instance_routes::<S>())
        .route(&format!("{}/", instance), instance_routes::<S>())
        .fallback(handlers::not_found_handler)
        // State
        .with_state(state)
}

fn collection_routes<S>() -> MethodRouter<AppState<S>>
where
    S: CourseStorage + Send + Sync + 'static,
{
    get(handlers::list_handler::<S>).post(handlers::create_handler::<S>)
}

fn instance_routes<S>() -> MethodRouter<AppState<S>>
where
    S: CourseStorage + Send + Sync + 'static,
{
    get(handlers::read_handler::<S>)
        .patch(handlers::patch_handler::<S>)
        .delete(handlers::delete_handler::<S>)
}
