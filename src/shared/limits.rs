//! Field bounds for sessions and chat messages.
//!
//! Lengths are counted in `char`s, not bytes, so a title of emoji is held to the
//! same bound as an ASCII one.

use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// Title used when a session is created without one
pub const DEFAULT_TITLE: &str = "Untitled session";

/// Size bounds applied to every write path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub max_title_chars: usize,
    pub max_content_chars: usize,
    pub max_message_chars: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_title_chars: 200,
            max_content_chars: 100_000,
            max_message_chars: 2_000,
        }
    }
}

impl Limits {
    /// Trim and check a session title. Returns the trimmed title.
    pub fn validate_title(&self, title: &str) -> Result<String, SharedError> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(SharedError::validation("title", "Title cannot be empty"));
        }
        if trimmed.chars().count() > self.max_title_chars {
            return Err(SharedError::validation(
                "title",
                format!("Title exceeds {} characters", self.max_title_chars),
            ));
        }
        Ok(trimmed.to_string())
    }

    /// Check document content. Content may be empty; it is stored untrimmed.
    pub fn validate_content(&self, content: &str) -> Result<(), SharedError> {
        if content.chars().count() > self.max_content_chars {
            return Err(SharedError::validation(
                "content",
                format!("Content exceeds {} characters", self.max_content_chars),
            ));
        }
        Ok(())
    }

    /// Check chat text or an assist prompt. Returns the trimmed text.
    pub fn validate_message_text(&self, field: &str, text: &str) -> Result<String, SharedError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SharedError::validation(field, "Text cannot be empty"));
        }
        if trimmed.chars().count() > self.max_message_chars {
            return Err(SharedError::validation(
                field,
                format!("Text exceeds {} characters", self.max_message_chars),
            ));
        }
        Ok(trimmed.to_string())
    }
}
