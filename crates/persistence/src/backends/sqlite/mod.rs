//! SQLite backend implementation.
//!
//! Supports in-memory databases (used by the test suites) and file-based
//! databases. All mutations run inside a single SQLite transaction.
//!
//! # Example
//!
//! ```no_run
//! use campus_persistence::backends::sqlite::SqliteBackend;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SqliteBackend::in_memory()?;
//! backend.init_schema()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE students (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     username TEXT NOT NULL UNIQUE,
//!     first_name TEXT NOT NULL DEFAULT '',
//!     last_name TEXT NOT NULL DEFAULT '',
//!     email TEXT NOT NULL DEFAULT '',
//!     created_at TEXT NOT NULL
//! );
//!
//! CREATE TABLE courses (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     name TEXT NOT NULL,
//!     created_at TEXT NOT NULL,
//!     updated_at TEXT NOT NULL
//! );
//!
//! CREATE TABLE course_students (
//!     course_id INTEGER NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
//!     student_id INTEGER NOT NULL REFERENCES students(id) ON DELETE CASCADE,
//!     PRIMARY KEY (course_id, student_id)
//! );
//! ```

mod backend;
mod schema;
mod storage;

pub use backend::{SqliteBackend, SqliteBackendConfig};
pub use schema::SCHEMA_VERSION;
