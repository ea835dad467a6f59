//! HTTP request handlers for course interactions.
//!
//! - [`list`] - List courses, optionally filtered by id or name
//! - [`read`] - Read a course by id
//! - [`create`] - Create a course
//! - [`update`] - Partially update a course
//! - [`delete`] - Delete a course
//! - [`health`] - Health, liveness and readiness endpoints

pub mod create;
pub mod delete;
pub mod health;
pub mod list;
pub mod read;
pub mod update;

// Re-export handlers for convenience
pub use create::create_handler;
pub use delete::delete_handler;
pub use health::{health_handler, liveness_handler, not_found_handler, readiness_handler};
pub use list::list_handler;
pub use read::read_handler;
pub use update::patch_handler;
