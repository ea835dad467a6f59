//! Error types for the persistence layer.
//!
//! This module defines all error types used throughout the persistence layer,
//! following a hierarchy that separates record state errors, validation
//! errors and backend failures.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Record state errors
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors related to record state.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The requested record was not found.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: i64 },

    /// A record with the same unique key already exists.
    #[error("{kind} already exists: {key}")]
    AlreadyExists { kind: &'static str, key: String },
}

/// Errors raised while validating input before it reaches the database.
///
/// Every variant names the offending field so the REST layer can report
/// field-keyed messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was not supplied.
    #[error("missing required field: {field}")]
    MissingRequiredField { field: &'static str },

    /// A string field was empty or whitespace only.
    #[error("field may not be blank: {field}")]
    BlankField { field: &'static str },

    /// A string field exceeded its maximum length.
    #[error("field {field} exceeds {max} characters (got {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    /// A relation referenced a record that does not exist.
    #[error("invalid reference in {field}: {id} does not exist")]
    UnknownReference { field: &'static str, id: i64 },

    /// A field carried a value of the wrong shape.
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: &'static str, message: String },
}

impl ValidationError {
    /// Returns the name of the field this error is about.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingRequiredField { field }
            | ValidationError::BlankField { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::UnknownReference { field, .. }
            | ValidationError::InvalidValue { field, .. } => field,
        }
    }
}

/// Errors originating from the database backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Could not obtain a database connection.
    #[error("connection to {backend_name} failed: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// Failed to (de)serialize stored data.
    #[error("serialization error: {message}")]
    SerializationError { message: String },

    /// Schema creation or migration failed.
    #[error("schema error in {backend_name}: {message}")]
    SchemaError {
        backend_name: String,
        message: String,
    },

    /// Any other backend failure.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
