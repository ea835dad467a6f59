//! Test data factories.
//!
//! Records are written straight through the storage traits so tests can
//! compare API output against known ids.

use std::sync::atomic::{AtomicUsize, Ordering};

use campus_persistence::backends::sqlite::SqliteBackend;
use campus_persistence::core::{CourseStorage, StudentStorage};
use campus_persistence::types::{Course, NewCourse, NewStudent, Student};

static SEQUENCE: AtomicUsize = AtomicUsize::new(0);

fn next_sequence() -> usize {
    SEQUENCE.fetch_add(1, Ordering::Relaxed)
}

/// Creates `quantity` students with unique usernames.
pub async fn student_factory(backend: &SqliteBackend, quantity: usize) -> Vec<Student> {
    let mut students = Vec::with_capacity(quantity);
    for _ in 0..quantity {
        let n = next_sequence();
        let student = backend
            .create_student(
                NewStudent::new(format!("student-{}", n))
                    .with_name("Test", format!("Student {}", n))
                    .with_email(format!("student-{}@example.com", n)),
            )
            .await
            .expect("Failed to create student");
        students.push(student);
    }
    students
}

/// Creates `quantity` courses with unique names, each enrolling `students`.
pub async fn course_factory(
    backend: &SqliteBackend,
    quantity: usize,
    students: &[Student],
) -> Vec<Course> {
    let ids: Vec<i64> = students.iter().map(|s| s.id).collect();
    let mut courses = Vec::with_capacity(quantity);
    for _ in 0..quantity {
        let course = backend
            .create_course(
                NewCourse::new(format!("Course {}", next_sequence())).with_students(ids.clone()),
            )
            .await
            .expect("Failed to create course");
        courses.push(course);
    }
    courses
}
