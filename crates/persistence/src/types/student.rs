//! Student records.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

use super::validate_text;

const MAX_USERNAME_LENGTH: usize = 150;

/// A stored student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// System-assigned identifier.
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Contact address.
    #[serde(default)]
    pub email: String,
}

/// Input for creating a student.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    /// Unique login name.
    pub username: String,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Contact address.
    #[serde(default)]
    pub email: String,
}

impl NewStudent {
    /// Creates a student input with only a username.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Default::default()
        }
    }

    /// Sets first and last name.
    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = first.into();
        self.last_name = last.into();
        self
    }

    /// Sets the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Validates the input.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_text("username", &self.username, MAX_USERNAME_LENGTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_student() {
        let student = NewStudent::new("STUDENT-admin")
            .with_name("Ada", "Lovelace")
            .with_email("ada@example.com");
        assert!(student.validate().is_ok());
        assert_eq!(student.last_name, "Lovelace");
    }

    #[test]
    fn test_blank_username_rejected() {
        assert_eq!(
            NewStudent::new("").validate(),
            Err(ValidationError::BlankField { field: "username" })
        );
    }
}
