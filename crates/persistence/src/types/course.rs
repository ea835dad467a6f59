//! Course records and the inputs that create or modify them.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

use super::validate_text;

/// Maximum number of characters in a course name.
pub const MAX_NAME_LENGTH: usize = 255;

/// A stored course.
///
/// `students` holds the ids of enrolled students in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// System-assigned identifier, stable for the lifetime of the record.
    pub id: i64,
    /// Display name. Not required to be unique.
    pub name: String,
    /// Ids of enrolled students.
    #[serde(default)]
    pub students: Vec<i64>,
}

/// Input for creating a course.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCourse {
    /// The course name.
    pub name: String,
    /// Students to enroll at creation time.
    #[serde(default)]
    pub students: Vec<i64>,
}

impl NewCourse {
    /// Creates a course input with no students.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            students: Vec::new(),
        }
    }

    /// Sets the students to enroll.
    pub fn with_students(mut self, students: impl IntoIterator<Item = i64>) -> Self {
        self.students = normalize_ids(students);
        self
    }

    /// Validates the input.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_text("name", &self.name, MAX_NAME_LENGTH)
    }
}

/// A partial update to a course. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoursePatch {
    /// Replacement name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replacement set of enrolled students.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub students: Option<Vec<i64>>,
}

impl CoursePatch {
    /// A patch that only renames the course.
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            students: None,
        }
    }

    /// Sets the replacement student set.
    pub fn with_students(mut self, students: impl IntoIterator<Item = i64>) -> Self {
        self.students = Some(normalize_ids(students));
        self
    }

    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.students.is_none()
    }

    /// Validates the supplied fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            validate_text("name", name, MAX_NAME_LENGTH)?;
        }
        Ok(())
    }

    /// Applies the patch to a course in memory.
    ///
    /// The name is stored trimmed, matching what [`NewCourse::validate`] checks.
    pub fn apply_to(&self, course: &mut Course) {
        if let Some(name) = &self.name {
            course.name = name.trim().to_string();
        }
        if let Some(students) = &self.students {
            course.students = normalize_ids(students.iter().copied());
        }
    }
}

/// Sorts and deduplicates a list of ids.
pub(crate) fn normalize_ids(ids: impl IntoIterator<Item = i64>) -> Vec<i64> {
    let mut ids: Vec<i64> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_course_validate() {
        assert!(NewCourse::new("Rust 101").validate().is_ok());
        assert_eq!(
            NewCourse::new("   ").validate(),
            Err(ValidationError::BlankField { field: "name" })
        );
    }

    #[test]
    fn test_name_length_counts_chars() {
        let cyrillic = "Я".repeat(MAX_NAME_LENGTH);
        assert!(NewCourse::new(cyrillic).validate().is_ok());

        let too_long = "x".repeat(MAX_NAME_LENGTH + 1);
        assert!(matches!(
            NewCourse::new(too_long).validate(),
            Err(ValidationError::TooLong { actual: 256, .. })
        ));
    }

    #[test]
    fn test_with_students_normalizes() {
        let course = NewCourse::new("C").with_students([3, 1, 3, 2]);
        assert_eq!(course.students, vec![1, 2, 3]);
    }

    #[test]
    fn test_patch_apply_only_touches_supplied_fields() {
        let mut course = Course {
            id: 4,
            name: "Old".to_string(),
            students: vec![1, 2],
        };

        CoursePatch::rename("Курс_2").apply_to(&mut course);
        assert_eq!(course.id, 4);
        assert_eq!(course.name, "Курс_2");
        assert_eq!(course.students, vec![1, 2]);

        CoursePatch::default().with_students([5]).apply_to(&mut course);
        assert_eq!(course.name, "Курс_2");
        assert_eq!(course.students, vec![5]);
    }

    #[test]
    fn test_patch_apply_trims_name() {
        let mut course = Course {
            id: 1,
            name: "C0".to_string(),
            students: vec![],
        };

        CoursePatch::rename("  C1 ").apply_to(&mut course);
        assert_eq!(course.name, "C1");
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(CoursePatch::default().is_empty());
        assert!(!CoursePatch::rename("x").is_empty());
    }

    #[test]
    fn test_course_json_shape() {
        let course = Course {
            id: 1,
            name: "C0".to_string(),
            students: vec![2, 9],
        };
        let value = serde_json::to_value(&course).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": 1, "name": "C0", "students": [2, 9]})
        );
    }
}
