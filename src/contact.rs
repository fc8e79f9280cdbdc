//! Contact form

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Contact form errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContactError {
    /// A required field is empty
    #[error("please fill in the {0} field")]
    MissingField(&'static str),
}

/// A message submitted through the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    /// Sender name
    pub name: String,

    /// Reply address
    pub email: String,

    /// Message body
    pub message: String,
}

impl ContactMessage {
    /// Create a message.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Check that every field has content.
    ///
    /// # Errors
    ///
    /// Returns [`ContactError::MissingField`] naming the first blank field.
    pub fn validate(&self) -> Result<(), ContactError> {
        let fields = [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ];

        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(ContactError::MissingField(field)),
            None => Ok(()),
        }
    }
}
