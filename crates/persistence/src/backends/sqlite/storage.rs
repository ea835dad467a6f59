//! CourseStorage and StudentStorage implementations for SQLite.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::types::Value as SqlValue;
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};

use crate::core::{CourseStorage, StudentStorage};
use crate::error::{ResourceError, StorageError, StorageResult, ValidationError};
use crate::types::{
    Course, CourseFilter, CoursePatch, NewCourse, NewStudent, Student, normalize_ids,
};

use super::SqliteBackend;
use super::backend::{BACKEND_NAME, internal_error};

fn not_found(kind: &'static str, id: i64) -> StorageError {
    StorageError::Resource(ResourceError::NotFound { kind, id })
}

/// Builds the WHERE clause for a course filter against the `c` alias.
fn filter_clause(filter: &CourseFilter) -> (String, Vec<SqlValue>) {
    let mut conditions = Vec::new();
    let mut values = Vec::new();

    if let Some(id) = filter.id {
        values.push(SqlValue::Integer(id));
        conditions.push(format!("c.id = ?{}", values.len()));
    }
    if let Some(name) = &filter.name {
        values.push(SqlValue::Text(name.clone()));
        conditions.push(format!("c.name = ?{}", values.len()));
    }

    if conditions.is_empty() {
        (String::new(), values)
    } else {
        (format!(" WHERE {}", conditions.join(" AND ")), values)
    }
}

fn query_courses(conn: &Connection, filter: &CourseFilter) -> StorageResult<Vec<Course>> {
    let (where_clause, values) = filter_clause(filter);

    let mut stmt = conn
        .prepare(&format!(
            "SELECT c.id, c.name FROM courses c{} ORDER BY c.id",
            where_clause
        ))
        .map_err(|e| internal_error(format!("Failed to prepare course query: {}", e)))?;
    let mut courses = stmt
        .query_map(params_from_iter(values.iter()), |row| {
            Ok(Course {
                id: row.get(0)?,
                name: row.get(1)?,
                students: Vec::new(),
            })
        })
        .and_then(|rows| rows.collect::<Result<Vec<_>, _>>())
        .map_err(|e| internal_error(format!("Failed to list courses: {}", e)))?;

    if courses.is_empty() {
        return Ok(courses);
    }

    let mut stmt = conn
        .prepare(&format!(
            "SELECT cs.course_id, cs.student_id
             FROM course_students cs JOIN courses c ON c.id = cs.course_id{}
             ORDER BY cs.student_id",
            where_clause
        ))
        .map_err(|e| internal_error(format!("Failed to prepare enrollment query: {}", e)))?;
    let mut enrollments: HashMap<i64, Vec<i64>> = HashMap::new();
    let rows = stmt
        .query_map(params_from_iter(values.iter()), |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?))
        })
        .map_err(|e| internal_error(format!("Failed to list enrollments: {}", e)))?;
    for row in rows {
        let (course_id, student_id) =
            row.map_err(|e| internal_error(format!("Failed to read enrollment: {}", e)))?;
        enrollments.entry(course_id).or_default().push(student_id);
    }

    for course in &mut courses {
        if let Some(students) = enrollments.remove(&course.id) {
            course.students = students;
        }
    }

    Ok(courses)
}

fn load_course(conn: &Connection, id: i64) -> StorageResult<Option<Course>> {
    Ok(query_courses(conn, &CourseFilter::all().with_id(id))?
        .into_iter()
        .next())
}

/// Fails with a validation error naming the first student id that does not exist.
fn ensure_students_exist(conn: &Connection, ids: &[i64]) -> StorageResult<()> {
    let mut stmt = conn
        .prepare_cached("SELECT 1 FROM students WHERE id = ?1")
        .map_err(|e| internal_error(format!("Failed to prepare student lookup: {}", e)))?;

    for &id in ids {
        let exists = stmt
            .exists([id])
            .map_err(|e| internal_error(format!("Failed to look up student: {}", e)))?;
        if !exists {
            return Err(StorageError::Validation(
                ValidationError::UnknownReference {
                    field: "students",
                    id,
                },
            ));
        }
    }
    Ok(())
}

fn replace_enrollments(conn: &Connection, course_id: i64, students: &[i64]) -> StorageResult<()> {
    conn.execute(
        "DELETE FROM course_students WHERE course_id = ?1",
        [course_id],
    )
    .map_err(|e| internal_error(format!("Failed to clear enrollments: {}", e)))?;

    let mut stmt = conn
        .prepare_cached("INSERT INTO course_students (course_id, student_id) VALUES (?1, ?2)")
        .map_err(|e| internal_error(format!("Failed to prepare enrollment insert: {}", e)))?;
    for &student_id in students {
        stmt.execute(params![course_id, student_id])
            .map_err(|e| internal_error(format!("Failed to insert enrollment: {}", e)))?;
    }
    Ok(())
}

fn count_rows(conn: &Connection, table: &str) -> StorageResult<u64> {
    let count: i64 = conn
        .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
            row.get(0)
        })
        .map_err(|e| internal_error(format!("Failed to count {}: {}", table, e)))?;
    Ok(count as u64)
}

fn read_student_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get(0)?,
        username: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        email: row.get(4)?,
    })
}

#[async_trait]
impl CourseStorage for SqliteBackend {
    fn backend_name(&self) -> &'static str {
        BACKEND_NAME
    }

    async fn create_course(&self, course: NewCourse) -> StorageResult<Course> {
        course.validate()?;
        let NewCourse { name, students } = course;
        let name = name.trim().to_string();
        let students = normalize_ids(students);

        self.with_connection(move |conn| {
            let tx = conn
                .transaction()
                .map_err(|e| internal_error(format!("Failed to begin transaction: {}", e)))?;

            ensure_students_exist(&tx, &students)?;

            let now = Utc::now().to_rfc3339();
            tx.execute(
                "INSERT INTO courses (name, created_at, updated_at) VALUES (?1, ?2, ?2)",
                params![name, now],
            )
            .map_err(|e| internal_error(format!("Failed to insert course: {}", e)))?;
            let id = tx.last_insert_rowid();

            replace_enrollments(&tx, id, &students)?;

            tx.commit()
                .map_err(|e| internal_error(format!("Failed to commit course: {}", e)))?;

            tracing::debug!(id, "Created course");
            Ok(Course { id, name, students })
        })
        .await
    }

    async fn read_course(&self, id: i64) -> StorageResult<Option<Course>> {
        self.with_connection(move |conn| load_course(conn, id)).await
    }

    async fn list_courses(&self, filter: &CourseFilter) -> StorageResult<Vec<Course>> {
        let filter = filter.clone();
        self.with_connection(move |conn| query_courses(conn, &filter))
            .await
    }

    async fn update_course(&self, id: i64, patch: CoursePatch) -> StorageResult<Course> {
        patch.validate()?;

        self.with_connection(move |conn| {
            let tx = conn
                .transaction()
                .map_err(|e| internal_error(format!("Failed to begin transaction: {}", e)))?;

            let mut course = load_course(&tx, id)?.ok_or_else(|| not_found("course", id))?;
            patch.apply_to(&mut course);

            if patch.name.is_some() {
                tx.execute(
                    "UPDATE courses SET name = ?1, updated_at = ?2 WHERE id = ?3",
                    params![course.name, Utc::now().to_rfc3339(), id],
                )
                .map_err(|e| internal_error(format!("Failed to update course: {}", e)))?;
            }

            if patch.students.is_some() {
                ensure_students_exist(&tx, &course.students)?;
                replace_enrollments(&tx, id, &course.students)?;
            }

            tx.commit()
                .map_err(|e| internal_error(format!("Failed to commit update: {}", e)))?;

            tracing::debug!(id, "Updated course");
            Ok(course)
        })
        .await
    }

    async fn delete_course(&self, id: i64) -> StorageResult<()> {
        self.with_connection(move |conn| {
            let tx = conn
                .transaction()
                .map_err(|e| internal_error(format!("Failed to begin transaction: {}", e)))?;

            tx.execute("DELETE FROM course_students WHERE course_id = ?1", [id])
                .map_err(|e| internal_error(format!("Failed to delete enrollments: {}", e)))?;
            let deleted = tx
                .execute("DELETE FROM courses WHERE id = ?1", [id])
                .map_err(|e| internal_error(format!("Failed to delete course: {}", e)))?;
            if deleted == 0 {
                return Err(not_found("course", id));
            }

            tx.commit()
                .map_err(|e| internal_error(format!("Failed to commit delete: {}", e)))?;

            tracing::debug!(id, "Deleted course");
            Ok(())
        })
        .await
    }

    async fn count_courses(&self) -> StorageResult<u64> {
        self.with_connection(|conn| count_rows(conn, "courses"))
            .await
    }
}

#[async_trait]
impl StudentStorage for SqliteBackend {
    async fn create_student(&self, student: NewStudent) -> StorageResult<Student> {
        student.validate()?;

        self.with_connection(move |conn| {
            let tx = conn
                .transaction()
                .map_err(|e| internal_error(format!("Failed to begin transaction: {}", e)))?;

            let taken = tx
                .query_row(
                    "SELECT 1 FROM students WHERE username = ?1",
                    [&student.username],
                    |_| Ok(()),
                )
                .optional()
                .map_err(|e| internal_error(format!("Failed to look up student: {}", e)))?
                .is_some();
            if taken {
                return Err(StorageError::Resource(ResourceError::AlreadyExists {
                    kind: "student",
                    key: student.username,
                }));
            }

            tx.execute(
                "INSERT INTO students (username, first_name, last_name, email, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    student.username,
                    student.first_name,
                    student.last_name,
                    student.email,
                    Utc::now().to_rfc3339()
                ],
            )
            .map_err(|e| internal_error(format!("Failed to insert student: {}", e)))?;
            let id = tx.last_insert_rowid();

            tx.commit()
                .map_err(|e| internal_error(format!("Failed to commit student: {}", e)))?;

            Ok(Student {
                id,
                username: student.username,
                first_name: student.first_name,
                last_name: student.last_name,
                email: student.email,
            })
        })
        .await
    }

    async fn read_student(&self, id: i64) -> StorageResult<Option<Student>> {
        self.with_connection(move |conn| {
            conn.query_row(
                "SELECT id, username, first_name, last_name, email FROM students WHERE id = ?1",
                [id],
                read_student_row,
            )
            .optional()
            .map_err(|e| internal_error(format!("Failed to read student: {}", e)))
        })
        .await
    }

    async fn list_students(&self) -> StorageResult<Vec<Student>> {
        self.with_connection(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT id, username, first_name, last_name, email FROM students ORDER BY id",
                )
                .map_err(|e| internal_error(format!("Failed to prepare student query: {}", e)))?;
            let students = stmt
                .query_map([], read_student_row)
                .and_then(|rows| rows.collect::<Result<Vec<_>, _>>())
                .map_err(|e| internal_error(format!("Failed to list students: {}", e)))?;
            Ok(students)
        })
        .await
    }

    async fn delete_student(&self, id: i64) -> StorageResult<()> {
        self.with_connection(move |conn| {
            let tx = conn
                .transaction()
                .map_err(|e| internal_error(format!("Failed to begin transaction: {}", e)))?;

            tx.execute("DELETE FROM course_students WHERE student_id = ?1", [id])
                .map_err(|e| internal_error(format!("Failed to delete enrollments: {}", e)))?;
            let deleted = tx
                .execute("DELETE FROM students WHERE id = ?1", [id])
                .map_err(|e| internal_error(format!("Failed to delete student: {}", e)))?;
            if deleted == 0 {
                return Err(not_found("student", id));
            }

            tx.commit()
                .map_err(|e| internal_error(format!("Failed to commit delete: {}", e)))
        })
        .await
    }

    async fn count_students(&self) -> StorageResult<u64> {
        self.with_connection(|conn| count_rows(conn, "students"))
            .await
    }
}
