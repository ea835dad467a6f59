//! Campus Persistence Layer
//!
//! This crate stores courses and the students enrolled in them. It exposes
//! async storage traits and a SQLite backend that implements them.
//!
//! # Backend Features
//!
//! - `sqlite` (default) - SQLite with in-memory and file modes
//!
//! # Architecture
//!
//! - [`types`] - Course and student records, inputs and filters
//! - [`error`] - Error types for all operations
//! - [`core`] - Storage traits
//! - [`backends`] - Backend implementations
//!
//! # Quick Start
//!
//! ```no_run
//! use campus_persistence::backends::sqlite::SqliteBackend;
//! use campus_persistence::core::CourseStorage;
//! use campus_persistence::types::{CourseFilter, NewCourse};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SqliteBackend::in_memory()?;
//! backend.init_schema()?;
//!
//! let course = backend.create_course(NewCourse::new("Rust 101")).await?;
//! let found = backend
//!     .list_courses(&CourseFilter::all().with_name("Rust 101"))
//!     .await?;
//! assert_eq!(found, vec![course]);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{StorageError, StorageResult};
pub use types::{Course, CourseFilter, CoursePatch, NewCourse, NewStudent, Student};

// Re-export core traits
pub use core::{CourseStorage, StudentStorage};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
