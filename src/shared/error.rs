//! Shared Error Types
//!
//! Error types used by both the server and the polling client. These cover the
//! failure cases that are checked before any storage or network work happens.
//!
//! # Usage
//!
//! ```rust
//! use studycollab::shared::error::SharedError;
//!
//! let error = SharedError::validation("text", "Message text cannot be empty");
//! assert_eq!(error.field(), Some("text"));
//! ```
use thiserror::Error;

/// Shared error types that can occur on both sides of the wire
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// A request field is missing, empty or over its bound
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the offending field
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::ValidationError { field, .. } => Some(field),
        }
    }
}
