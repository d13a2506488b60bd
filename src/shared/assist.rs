//! AI-assist request and response types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::message::ChatMessage;
use crate::shared::session::Session;

/// Default number of assist calls a user may make per session per day
pub const DEFAULT_DAILY_LIMIT: u32 = 10;

/// Prefix of the system message recorded after a successful assist call
pub const ASSIST_SYSTEM_NOTE: &str = "AI assistant added a response to the document";

/// A caller's quota state for one session on one UTC day
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssistUsage {
    pub day: NaiveDate,
    pub used: u32,
    pub limit: u32,
    pub remaining: u32,
}

impl AssistUsage {
    pub fn new(day: NaiveDate, used: u32, limit: u32) -> Self {
        Self {
            day,
            used,
            limit,
            remaining: limit.saturating_sub(used),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

/// Request AI assist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistRequest {
    pub prompt: String,
}

/// Result of a successful, charged assist call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssistOutcome {
    /// Text returned by the upstream model
    pub reply: String,
    /// Session after the reply was appended
    pub session: Session,
    /// The system message that records the action
    pub message: ChatMessage,
    /// Quota after the charge
    pub usage: AssistUsage,
}

/// Response of the send-message endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SendMessageResponse {
    Message(ChatMessage),
    Assist(AssistOutcome),
}

/// Format the block appended to document content for a reply
pub fn assist_block(reply: &str) -> String {
    format!("\n\n{}", reply.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_remaining_saturates() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(AssistUsage::new(day, 3, 10).remaining, 7);
        let full = AssistUsage::new(day, 12, 10);
        assert_eq!(full.remaining, 0);
        assert!(full.is_exhausted());
    }

    #[test]
    fn test_assist_block_trims_reply() {
        assert_eq!(assist_block("  Photosynthesis converts light.\n"), "\n\nPhotosynthesis converts light.");
    }
}
