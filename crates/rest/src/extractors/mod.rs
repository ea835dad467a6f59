//! Axum extractors for course requests.
//!
//! - [`CoursePayload`] - JSON or form body for create and update
//! - [`CourseId`] - Integer `{id}` path segment
//! - [`CourseQuery`] - `id` and `name` list filters

mod course_id;
mod course_payload;
mod course_query;

pub use course_id::{CourseId, parse_course_id};
pub use course_payload::CoursePayload;
pub use course_query::{CourseQuery, CourseQueryParams};
