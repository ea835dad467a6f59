//! Partial update interaction handler.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use campus_persistence::core::CourseStorage;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::extractors::{CourseId, CoursePayload};
use crate::state::AppState;

/// Handler for the partial update interaction.
///
/// Only the fields present in the body change. `students`, when present,
/// replaces the whole enrollment list.
///
/// # HTTP Request
///
/// `PATCH [prefix]/courses/[id]/`
///
/// # Response
///
/// - `200 OK` - The full updated course
/// - `400 Bad Request` - The body does not parse or a supplied field is invalid
/// - `415 Unsupported Media Type` - The body is neither JSON nor a form
/// - `404 Not Found` - No course has this id
pub async fn patch_handler<S>(
    State(state): State<AppState<S>>,
    CourseId(id): CourseId,
    payload: Result<CoursePayload, RestError>,
) -> RestResult<Response>
where
    S: CourseStorage + Send + Sync,
{
    debug!(id, "Processing patch request");

    let patch = match payload.and_then(CoursePayload::into_patch) {
        Ok(patch) => patch,
        // An unknown course is reported before an unreadable body or invalid fields
        Err(e) => {
            if state.storage().read_course(id).await?.is_none() {
                return Err(RestError::NotFound {
                    kind: "course".to_string(),
                    id: id.to_string(),
                });
            }
            return Err(e);
        }
    };
    let updated = state.storage().update_course(id, patch).await?;

    debug!(id, name = %updated.name, "Course updated");

    Ok(Json(updated).into_response())
}
