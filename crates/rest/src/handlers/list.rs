//! List interaction handler.
//!
//! `GET [prefix]/courses/` with optional `id` and `name` filters.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use campus_persistence::core::CourseStorage;
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::CourseQuery;
use crate::state::AppState;

/// Handler for the list interaction.
///
/// Returns every course matching the filters in ascending id order. Both
/// filters are exact and are combined with AND.
///
/// # HTTP Request
///
/// `GET [prefix]/courses/?id=[id]&name=[name]`
///
/// # Response
///
/// - `200 OK` - JSON array of courses (possibly empty)
/// - `400 Bad Request` - `id` is not an integer
pub async fn list_handler<S>(
    State(state): State<AppState<S>>,
    CourseQuery(filter): CourseQuery,
) -> RestResult<Response>
where
    S: CourseStorage + Send + Sync,
{
    debug!(
        id = ?filter.id,
        name = ?filter.name,
        "Processing list request"
    );

    let courses = state.storage().list_courses(&filter).await?;

    debug!(count = courses.len(), "Courses listed");

    Ok(Json(courses).into_response())
}
