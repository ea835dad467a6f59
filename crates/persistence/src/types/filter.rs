//! Course listing filters.

use serde::{Deserialize, Serialize};

use super::Course;

/// Exact-match filters for course listings.
///
/// Set fields are combined with AND. An empty filter matches every course.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseFilter {
    /// Match only the course with this id.
    pub id: Option<i64>,
    /// Match only courses whose name equals this value exactly.
    pub name: Option<String>,
}

impl CourseFilter {
    /// A filter that matches everything.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts to a single id.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Restricts to an exact name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns true if no restriction is set.
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.name.is_none()
    }

    /// Evaluates the filter against a course.
    pub fn matches(&self, course: &Course) -> bool {
        self.id.is_none_or(|id| course.id == id)
            && self.name.as_deref().is_none_or(|name| course.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: i64, name: &str) -> Course {
        Course {
            id,
            name: name.to_string(),
            students: vec![],
        }
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let filter = CourseFilter::all();
        assert!(filter.is_empty());
        assert!(filter.matches(&course(1, "C0")));
    }

    #[test]
    fn test_name_is_exact_match() {
        let filter = CourseFilter::all().with_name("C1");
        assert!(filter.matches(&course(2, "C1")));
        assert!(!filter.matches(&course(3, "C10")));
        assert!(!filter.matches(&course(4, "c1")));
    }

    #[test]
    fn test_filters_combine_with_and() {
        let filter = CourseFilter::all().with_id(2).with_name("C1");
        assert!(filter.matches(&course(2, "C1")));
        assert!(!filter.matches(&course(2, "C2")));
        assert!(!filter.matches(&course(3, "C1")));
    }
}
