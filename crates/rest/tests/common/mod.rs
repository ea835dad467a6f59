//! Common test utilities for REST API testing.
//!
//! - [`harness`] - Test server construction
//! - [`fixtures`] - Student and course factories
//! - [`assertions`] - HTTP response assertions

// Each test binary uses a different subset of these helpers
#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;
pub mod harness;
