//! Storage traits for courses and students.
//!
//! Every operation is async and returns a [`StorageResult`]. Backends are
//! shared across request handlers, so implementations must be `Send + Sync`.

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::types::{Course, CourseFilter, CoursePatch, NewCourse, NewStudent, Student};

/// Storage for course records.
///
/// # Example
///
/// ```ignore
/// use campus_persistence::core::CourseStorage;
/// use campus_persistence::types::{CourseFilter, CoursePatch, NewCourse};
///
/// async fn example<S: CourseStorage>(storage: &S) -> StorageResult<()> {
///     let created = storage.create_course(NewCourse::new("Rust 101")).await?;
///
///     let read = storage.read_course(created.id).await?;
///     assert_eq!(read, Some(created.clone()));
///
///     let renamed = storage
///         .update_course(created.id, CoursePatch::rename("Rust 102"))
///         .await?;
///     assert_eq!(renamed.id, created.id);
///
///     let matches = storage
///         .list_courses(&CourseFilter::all().with_name("Rust 102"))
///         .await?;
///     assert_eq!(matches.len(), 1);
///
///     storage.delete_course(created.id).await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait CourseStorage: Send + Sync {
    /// Returns a human-readable name for this storage backend.
    fn backend_name(&self) -> &'static str;

    /// Creates a course and assigns its id.
    ///
    /// # Errors
    ///
    /// * `StorageError::Validation` - If the name is blank or too long, or a
    ///   listed student does not exist
    async fn create_course(&self, course: NewCourse) -> StorageResult<Course>;

    /// Reads a course by id. Returns `None` if it does not exist.
    async fn read_course(&self, id: i64) -> StorageResult<Option<Course>>;

    /// Lists courses matching the filter in ascending id order.
    async fn list_courses(&self, filter: &CourseFilter) -> StorageResult<Vec<Course>>;

    /// Applies a partial update and returns the full updated course.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(NotFound)` - If the course does not exist
    /// * `StorageError::Validation` - If a supplied field is invalid
    async fn update_course(&self, id: i64, patch: CoursePatch) -> StorageResult<Course>;

    /// Permanently deletes a course and its enrollments.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(NotFound)` - If the course does not exist
    async fn delete_course(&self, id: i64) -> StorageResult<()>;

    /// Returns the number of stored courses.
    async fn count_courses(&self) -> StorageResult<u64>;
}

/// Storage for student records.
#[async_trait]
pub trait StudentStorage: Send + Sync {
    /// Creates a student.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(AlreadyExists)` - If the username is taken
    async fn create_student(&self, student: NewStudent) -> StorageResult<Student>;

    /// Reads a student by id.
    async fn read_student(&self, id: i64) -> StorageResult<Option<Student>>;

    /// Lists all students in ascending id order.
    async fn list_students(&self) -> StorageResult<Vec<Student>>;

    /// Deletes a student. Courses keep existing; only enrollments go away.
    async fn delete_student(&self, id: i64) -> StorageResult<()>;

    /// Returns the number of stored students.
    async fn count_students(&self) -> StorageResult<u64>;
}
