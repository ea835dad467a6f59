//! Error types for the courses REST API.
//!
//! This module defines all error types used throughout the REST API layer,
//! with automatic conversion to JSON error responses.
//!
//! # Error Mapping
//!
//! Storage errors from the persistence layer are automatically mapped to
//! appropriate HTTP status codes and response bodies:
//!
//! | Storage Error | HTTP Status | Body |
//! |--------------|-------------|------|
//! | NotFound | 404 | `{"detail": "Not found."}` |
//! | AlreadyExists | 409 | `{"detail": ...}` |
//! | Validation | 400 | `{"<field>": ["<message>"]}` |
//! | Backend | 500 | `{"detail": ...}` |

use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use campus_persistence::error::{BackendError, ResourceError, StorageError, ValidationError};
use thiserror::Error;
use tracing::error;

/// Field-keyed validation messages, serialized as a JSON object of arrays.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// The primary error type for REST API operations.
///
/// Each variant maps to one HTTP status code.
#[derive(Debug, Error)]
pub enum RestError {
    /// Resource not found (HTTP 404).
    #[error("{kind} not found: {id}")]
    NotFound {
        /// The kind of resource (e.g., "course").
        kind: String,
        /// The identifier as it appeared in the request.
        id: String,
    },

    /// One or more fields failed validation (HTTP 400).
    #[error("Validation failed: {}", format_field_errors(.errors))]
    Validation {
        /// Messages per offending field.
        errors: FieldErrors,
    },

    /// The request could not be parsed (HTTP 400).
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message.
        message: String,
    },

    /// Unsupported media type (HTTP 415).
    #[error("Unsupported media type: {content_type}")]
    UnsupportedMediaType {
        /// The unsupported content type.
        content_type: String,
    },

    /// Request body exceeds the configured limit (HTTP 413).
    #[error("Request body too large")]
    PayloadTooLarge,

    /// Conflicts with existing data (HTTP 409).
    #[error("Conflict: {message}")]
    Conflict {
        /// Message describing the conflict.
        message: String,
    },

    /// Internal server error (HTTP 500).
    #[error("Internal error: {message}")]
    InternalError {
        /// Error message.
        message: String,
    },
}

impl RestError {
    /// Builds a validation error for a single field.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.into(), vec![message.into()]);
        RestError::Validation { errors }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::NotFound { .. } => StatusCode::NOT_FOUND,
            RestError::Validation { .. } | RestError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            RestError::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            RestError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            RestError::Conflict { .. } => StatusCode::CONFLICT,
            RestError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the JSON body for this error.
    pub fn body(&self) -> serde_json::Value {
        match self {
            RestError::NotFound { .. } => detail("Not found."),
            RestError::Validation { errors } => serde_json::json!(errors),
            RestError::BadRequest { message } => detail(message),
            RestError::UnsupportedMediaType { content_type } => detail(&format!(
                "Unsupported media type \"{}\" in request.",
                content_type
            )),
            RestError::PayloadTooLarge => detail("Request body too large."),
            RestError::Conflict { message } => detail(message),
            RestError::InternalError { .. } => detail("A server error occurred."),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        if let RestError::InternalError { message } = &self {
            error!(error = %message, "Request failed with internal error");
        }
        (self.status_code(), Json(self.body())).into_response()
    }
}

fn detail(message: &str) -> serde_json::Value {
    serde_json::json!({ "detail": message })
}

fn format_field_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, messages)| format!("{}: {}", field, messages.join(" ")))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Returns the client-facing message for a persistence validation failure.
pub fn validation_message(err: &ValidationError) -> String {
    match err {
        ValidationError::MissingRequiredField { .. } => "This field is required.".to_string(),
        ValidationError::BlankField { .. } => "This field may not be blank.".to_string(),
        ValidationError::TooLong { max, .. } => {
            format!("Ensure this field has no more than {} characters.", max)
        }
        ValidationError::UnknownReference { id, .. } => {
            format!("Invalid pk \"{}\" - object does not exist.", id)
        }
        ValidationError::InvalidValue { message, .. } => message.clone(),
    }
}

// Implement conversions from storage errors

impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Resource(e) => e.into(),
            StorageError::Validation(e) => e.into(),
            StorageError::Backend(e) => e.into(),
        }
    }
}

impl From<ResourceError> for RestError {
    fn from(err: ResourceError) -> Self {
        match err {
            ResourceError::NotFound { kind, id } => RestError::NotFound {
                kind: kind.to_string(),
                id: id.to_string(),
            },
            ResourceError::AlreadyExists { .. } => RestError::Conflict {
                message: err.to_string(),
            },
        }
    }
}

impl From<ValidationError> for RestError {
    fn from(err: ValidationError) -> Self {
        RestError::field(err.field(), validation_message(&err))
    }
}

impl From<BackendError> for RestError {
    fn from(err: BackendError) -> Self {
        RestError::InternalError {
            message: err.to_string(),
        }
    }
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;
