//! Create interaction handler.
//!
//! `POST [prefix]/courses/`

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use campus_persistence::core::CourseStorage;
use tracing::{debug, info};

use crate::error::RestResult;
use crate::extractors::CoursePayload;
use crate::state::AppState;

/// Handler for the create interaction.
///
/// Creates a new course with a server-assigned id.
///
/// # HTTP Request
///
/// `POST [prefix]/courses/`
///
/// # Request Body
///
/// JSON or form-encoded fields:
/// - `name` (required) - Non-blank course name
/// - `students` (optional) - Ids of existing students
///
/// # Response
///
/// - `201 Created` - The created course, with a `Location` header
/// - `400 Bad Request` - Missing or invalid fields
/// - `415 Unsupported Media Type` - Body is neither JSON nor form data
///
/// # Example
///
/// ```http
/// POST /api/v1/courses/ HTTP/1.1
/// Content-Type: application/json
///
/// {"name": "Курс_1", "students": [1, 2]}
/// ```
pub async fn create_handler<S>(
    State(state): State<AppState<S>>,
    payload: CoursePayload,
) -> RestResult<Response>
where
    S: CourseStorage + Send + Sync,
{
    debug!(fields = payload.fields().len(), "Processing create request");

    let new_course = payload.into_new_course()?;
    let created = state.storage().create_course(new_course).await?;

    info!(id = created.id, name = %created.name, "Course created");

    let location = state.course_url(created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    )
        .into_response())
}
