//! SQLite backend integration tests.
//!
//! These tests exercise the course and student storage traits against an
//! in-memory SQLite database (and one file-backed database).

use campus_persistence::backends::sqlite::SqliteBackend;
use campus_persistence::core::{CourseStorage, StudentStorage};
use campus_persistence::error::{ResourceError, StorageError, ValidationError};
use campus_persistence::types::{CourseFilter, CoursePatch, NewCourse, NewStudent};

fn create_backend() -> SqliteBackend {
    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    backend.init_schema().expect("Failed to initialize schema");
    backend
}

async fn seed_students(backend: &SqliteBackend, count: usize) -> Vec<i64> {
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let student = backend
            .create_student(NewStudent::new(format!("student-{}", i)))
            .await
            .expect("Failed to seed student");
        ids.push(student.id);
    }
    ids
}

async fn seed_courses(backend: &SqliteBackend, count: usize) -> Vec<i64> {
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let course = backend
            .create_course(NewCourse::new(format!("C{}", i)))
            .await
            .expect("Failed to seed course");
        ids.push(course.id);
    }
    ids
}

// ============================================================================
// Create Tests
// ============================================================================

#[tokio::test]
async fn test_create_course_assigns_id() {
    let backend = create_backend();

    let course = backend
        .create_course(NewCourse::new("Курс_1"))
        .await
        .expect("Create should succeed");

    assert!(course.id > 0);
    assert_eq!(course.name, "Курс_1");
    assert!(course.students.is_empty());
    assert_eq!(backend.count_courses().await.unwrap(), 1);
}

#[tokio::test]
async fn test_create_course_trims_name() {
    let backend = create_backend();

    let course = backend.create_course(NewCourse::new(" C0 ")).await.unwrap();
    assert_eq!(course.name, "C0");

    let found = backend
        .list_courses(&CourseFilter::all().with_name("C0"))
        .await
        .unwrap();
    assert_eq!(found, vec![course]);
}

#[tokio::test]
async fn test_create_course_ids_are_unique() {
    let backend = create_backend();
    let mut ids = seed_courses(&backend, 10).await;

    ids.dedup();
    assert_eq!(ids.len(), 10);
}

#[tokio::test]
async fn test_create_course_with_students() {
    let backend = create_backend();
    let students = seed_students(&backend, 5).await;

    let course = backend
        .create_course(NewCourse::new("Rust").with_students(students.iter().rev().copied()))
        .await
        .unwrap();

    assert_eq!(course.students, students);
    let read = backend.read_course(course.id).await.unwrap().unwrap();
    assert_eq!(read.students, students);
}

#[tokio::test]
async fn test_create_course_blank_name_rejected() {
    let backend = create_backend();

    let result = backend.create_course(NewCourse::new("  ")).await;

    assert!(matches!(
        result,
        Err(StorageError::Validation(ValidationError::BlankField {
            field: "name"
        }))
    ));
    assert_eq!(backend.count_courses().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_course_unknown_student_rolls_back() {
    let backend = create_backend();
    let students = seed_students(&backend, 1).await;

    let result = backend
        .create_course(NewCourse::new("C").with_students([students[0], 999]))
        .await;

    assert!(matches!(
        result,
        Err(StorageError::Validation(ValidationError::UnknownReference {
            field: "students",
            id: 999
        }))
    ));
    assert_eq!(backend.count_courses().await.unwrap(), 0);
}

// ============================================================================
// Read / List Tests
// ============================================================================

#[tokio::test]
async fn test_read_course() {
    let backend = create_backend();
    let ids = seed_courses(&backend, 2).await;

    let course = backend.read_course(ids[0]).await.unwrap().unwrap();

    assert_eq!(course.id, ids[0]);
    assert_eq!(course.name, "C0");
}

#[tokio::test]
async fn test_read_missing_course_returns_none() {
    let backend = create_backend();

    assert!(backend.read_course(42).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_preserves_creation_order() {
    let backend = create_backend();
    let ids = seed_courses(&backend, 10).await;

    let courses = backend.list_courses(&CourseFilter::all()).await.unwrap();

    let listed: Vec<i64> = courses.iter().map(|c| c.id).collect();
    assert_eq!(listed, ids);
}

#[tokio::test]
async fn test_list_filter_by_id() {
    let backend = create_backend();
    let ids = seed_courses(&backend, 2).await;

    let courses = backend
        .list_courses(&CourseFilter::all().with_id(ids[1]))
        .await
        .unwrap();

    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].id, ids[1]);
}

#[tokio::test]
async fn test_list_filter_by_name_is_exact() {
    let backend = create_backend();
    seed_courses(&backend, 12).await;

    let courses = backend
        .list_courses(&CourseFilter::all().with_name("C1"))
        .await
        .unwrap();

    // "C10" and "C11" must not match.
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].name, "C1");
}

#[tokio::test]
async fn test_list_filter_by_name_returns_duplicates() {
    let backend = create_backend();
    backend.create_course(NewCourse::new("Same")).await.unwrap();
    backend.create_course(NewCourse::new("Other")).await.unwrap();
    backend.create_course(NewCourse::new("Same")).await.unwrap();

    let courses = backend
        .list_courses(&CourseFilter::all().with_name("Same"))
        .await
        .unwrap();

    assert_eq!(courses.len(), 2);
    assert!(courses.iter().all(|c| c.name == "Same"));
    assert!(courses[0].id < courses[1].id);
}

#[tokio::test]
async fn test_list_filter_with_no_match() {
    let backend = create_backend();
    seed_courses(&backend, 3).await;

    let courses = backend
        .list_courses(&CourseFilter::all().with_id(1).with_name("C2"))
        .await
        .unwrap();

    assert!(courses.is_empty());
}

#[tokio::test]
async fn test_list_attaches_students_per_course() {
    let backend = create_backend();
    let students = seed_students(&backend, 3).await;
    let first = backend
        .create_course(NewCourse::new("A").with_students([students[0], students[1]]))
        .await
        .unwrap();
    let second = backend
        .create_course(NewCourse::new("B").with_students([students[2]]))
        .await
        .unwrap();
    let third = backend.create_course(NewCourse::new("C")).await.unwrap();

    let courses = backend.list_courses(&CourseFilter::all()).await.unwrap();

    assert_eq!(courses, vec![first, second, third]);
}

// ============================================================================
// Update Tests
// ============================================================================

#[tokio::test]
async fn test_update_name_leaves_other_fields() {
    let backend = create_backend();
    let students = seed_students(&backend, 2).await;
    let course = backend
        .create_course(NewCourse::new("C0").with_students(students.clone()))
        .await
        .unwrap();

    let updated = backend
        .update_course(course.id, CoursePatch::rename("Курс_2"))
        .await
        .unwrap();

    assert_eq!(updated.id, course.id);
    assert_eq!(updated.name, "Курс_2");
    assert_eq!(updated.students, students);
}

#[tokio::test]
async fn test_update_students_replaces_enrollment() {
    let backend = create_backend();
    let students = seed_students(&backend, 3).await;
    let course = backend
        .create_course(NewCourse::new("C0").with_students([students[0]]))
        .await
        .unwrap();

    let updated = backend
        .update_course(
            course.id,
            CoursePatch::default().with_students([students[1], students[2]]),
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "C0");
    assert_eq!(updated.students, vec![students[1], students[2]]);
}

#[tokio::test]
async fn test_empty_patch_returns_current() {
    let backend = create_backend();
    let course = backend.create_course(NewCourse::new("C0")).await.unwrap();

    let updated = backend
        .update_course(course.id, CoursePatch::default())
        .await
        .unwrap();

    assert_eq!(updated, course);
}

#[tokio::test]
async fn test_update_missing_course() {
    let backend = create_backend();

    let result = backend.update_course(7, CoursePatch::rename("x")).await;

    assert!(matches!(
        result,
        Err(StorageError::Resource(ResourceError::NotFound {
            kind: "course",
            id: 7
        }))
    ));
}

#[tokio::test]
async fn test_update_unknown_student_keeps_old_state() {
    let backend = create_backend();
    let course = backend.create_course(NewCourse::new("C0")).await.unwrap();

    let result = backend
        .update_course(
            course.id,
            CoursePatch::rename("renamed").with_students([123]),
        )
        .await;

    assert!(matches!(result, Err(StorageError::Validation(_))));
    let read = backend.read_course(course.id).await.unwrap().unwrap();
    assert_eq!(read.name, "C0");
}

// ============================================================================
// Delete Tests
// ============================================================================

#[tokio::test]
async fn test_delete_course() {
    let backend = create_backend();
    let ids = seed_courses(&backend, 10).await;

    backend.delete_course(ids[0]).await.unwrap();

    assert_eq!(backend.count_courses().await.unwrap(), 9);
    let remaining = backend.list_courses(&CourseFilter::all()).await.unwrap();
    assert!(remaining.iter().all(|c| c.id != ids[0]));
}

#[tokio::test]
async fn test_delete_missing_course() {
    let backend = create_backend();

    let result = backend.delete_course(1).await;

    assert!(matches!(
        result,
        Err(StorageError::Resource(ResourceError::NotFound { .. }))
    ));
}

#[tokio::test]
async fn test_delete_course_keeps_students() {
    let backend = create_backend();
    let students = seed_students(&backend, 5).await;
    let course = backend
        .create_course(NewCourse::new("C0").with_students(students.clone()))
        .await
        .unwrap();

    backend.delete_course(course.id).await.unwrap();

    assert_eq!(backend.count_students().await.unwrap(), 5);
    assert!(backend.read_course(course.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_ids_not_reused_after_delete() {
    let backend = create_backend();
    let ids = seed_courses(&backend, 2).await;

    backend.delete_course(ids[1]).await.unwrap();
    let next = backend.create_course(NewCourse::new("C2")).await.unwrap();

    assert!(next.id > ids[1]);
}

// ============================================================================
// Student Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_read_student() {
    let backend = create_backend();

    let student = backend
        .create_student(NewStudent::new("STUDENT-admin").with_email("admin@example.com"))
        .await
        .unwrap();

    let read = backend.read_student(student.id).await.unwrap();
    assert_eq!(read, Some(student));
}

#[tokio::test]
async fn test_duplicate_username_rejected() {
    let backend = create_backend();
    backend
        .create_student(NewStudent::new("STUDENT-admin"))
        .await
        .unwrap();

    let result = backend.create_student(NewStudent::new("STUDENT-admin")).await;

    assert!(matches!(
        result,
        Err(StorageError::Resource(ResourceError::AlreadyExists { .. }))
    ));
}

#[tokio::test]
async fn test_delete_student_removes_enrollment_only() {
    let backend = create_backend();
    let students = seed_students(&backend, 2).await;
    let course = backend
        .create_course(NewCourse::new("C0").with_students(students.clone()))
        .await
        .unwrap();

    backend.delete_student(students[0]).await.unwrap();

    let read = backend.read_course(course.id).await.unwrap().unwrap();
    assert_eq!(read.students, vec![students[1]]);
    assert_eq!(backend.list_students().await.unwrap().len(), 1);
}

// ============================================================================
// File-backed Database
// ============================================================================

#[tokio::test]
async fn test_file_database_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("campus.db");

    let id = {
        let backend = SqliteBackend::open(&path).unwrap();
        backend.init_schema().unwrap();
        backend.create_course(NewCourse::new("Durable")).await.unwrap().id
    };

    let backend = SqliteBackend::open(&path).unwrap();
    backend.init_schema().unwrap();
    let course = backend.read_course(id).await.unwrap().unwrap();
    assert_eq!(course.name, "Durable");
}
