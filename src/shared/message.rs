/**
 * Chat Message Data Structure
 *
 * Messages form an append-only log embedded in a session. They are never
 * edited; they disappear only when their session is deleted.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who produced a message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Written by a session member
    User,
    /// Recorded by the server (e.g. an AI-assist action)
    System,
}

impl MessageKind {
    /// Convert to string for database storage
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::User => "user",
            MessageKind::System => "system",
        }
    }

    /// Parse from string (database). Unknown kinds yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(MessageKind::User),
            "system" => Some(MessageKind::System),
            _ => None,
        }
    }
}

/// A single chat message in a session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: Uuid,
    pub session_id: Uuid,
    /// `None` for system messages
    pub author_id: Option<Uuid>,
    pub kind: MessageKind,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a message written by a member, stamped now
    ///
    /// The store replaces `created_at` when the message is appended.
    pub fn user(session_id: Uuid, author_id: Uuid, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            author_id: Some(author_id),
            kind: MessageKind::User,
            text,
            created_at: Utc::now(),
        }
    }

    /// Create a server-authored message, stamped now
    pub fn system(session_id: Uuid, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            author_id: None,
            kind: MessageKind::System,
            text,
            created_at: Utc::now(),
        }
    }
}

/// Send message request
///
/// When `assist` is set the text is treated as a prompt for the AI
/// assistant and goes through the daily quota gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
    #[serde(default)]
    pub assist: bool,
}

/// Query parameters for listing messages
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListMessagesParams {
    /// Only return messages created at or after this instant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<DateTime<Utc>>,
}

/// List messages response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMessagesResponse {
    pub messages: Vec<ChatMessage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message() {
        let session_id = Uuid::new_v4();
        let author = Uuid::new_v4();
        let message = ChatMessage::user(session_id, author, "hello".to_string());
        assert_eq!(message.kind, MessageKind::User);
        assert_eq!(message.author_id, Some(author));
        assert_eq!(message.session_id, session_id);
    }

    #[test]
    fn test_system_message_has_no_author() {
        let message = ChatMessage::system(Uuid::new_v4(), "AI assistant updated the document".into());
        assert_eq!(message.kind, MessageKind::System);
        assert!(message.author_id.is_none());
    }

    #[test]
    fn test_kind_storage_strings() {
        assert_eq!(MessageKind::parse(MessageKind::System.as_str()), Some(MessageKind::System));
        assert_eq!(MessageKind::parse(MessageKind::User.as_str()), Some(MessageKind::User));
        assert_eq!(MessageKind::parse("garbage"), None);
        assert_eq!(MessageKind::parse("System"), None);
    }

    #[test]
    fn test_send_request_assist_defaults_false() {
        let request: SendMessageRequest = serde_json::from_str(r#"{"text":"hi"}"#).unwrap();
        assert!(!request.assist);
    }
}
