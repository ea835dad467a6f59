//! Course id path extractor.

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::RestError;

/// The `{id}` path segment of a course URL.
///
/// A segment that is not an integer cannot name a stored course, so it is
/// rejected with 404 rather than 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseId(pub i64);

impl CourseId {
    /// Returns the numeric id.
    pub fn get(self) -> i64 {
        self.0
    }
}

/// Parses a raw path segment into a course id.
pub fn parse_course_id(raw: &str) -> Result<CourseId, RestError> {
    raw.parse::<i64>()
        .map(CourseId)
        .map_err(|_| RestError::NotFound {
            kind: "course".to_string(),
            id: raw.to_string(),
        })
}

impl<S> FromRequestParts<S> for CourseId
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| RestError::BadRequest {
                message: e.body_text(),
            })?;
        parse_course_id(&raw)
    }
}
