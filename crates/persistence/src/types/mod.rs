//! Core types for the persistence layer.
//!
//! - [`Course`], [`NewCourse`], [`CoursePatch`] - the course record and its inputs
//! - [`Student`], [`NewStudent`] - enrolled users
//! - [`CourseFilter`] - exact-match filters for course listings

mod course;
mod filter;
mod student;

pub use course::{Course, CoursePatch, MAX_NAME_LENGTH, NewCourse};
pub(crate) use course::normalize_ids;
pub use filter::CourseFilter;
pub use student::{NewStudent, Student};

use crate::error::ValidationError;

/// Checks a required text field for blankness and length.
pub(crate) fn validate_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField { field });
    }
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong { field, max, actual });
    }
    Ok(())
}
