//! Read interaction handler.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use campus_persistence::core::CourseStorage;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::extractors::CourseId;
use crate::state::AppState;

/// Handler for the read interaction.
///
/// # HTTP Request
///
/// `GET [prefix]/courses/[id]/`
///
/// # Response
///
/// - `200 OK` - The course
/// - `404 Not Found` - No course has this id
pub async fn read_handler<S>(
    State(state): State<AppState<S>>,
    CourseId(id): CourseId,
) -> RestResult<Response>
where
    S: CourseStorage + Send + Sync,
{
    debug!(id, "Processing read request");

    let course = state
        .storage()
        .read_course(id)
        .await?
        .ok_or_else(|| RestError::NotFound {
            kind: "course".to_string(),
            id: id.to_string(),
        })?;

    Ok(Json(course).into_response())
}
