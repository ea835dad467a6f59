//! Core storage traits.
//!
//! - [`CourseStorage`] - CRUD and filtered listing for courses
//! - [`StudentStorage`] - CRUD for students
//!
//! Backends implement both traits; the REST layer is generic over them.

mod storage;

pub use storage::{CourseStorage, StudentStorage};
