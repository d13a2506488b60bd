/**
 * Collaboration Session Data Structures
 *
 * A session is a shared document with an owner, a roster of participants
 * and an embedded chat log. These types travel over the JSON API and are
 * returned by every store backend.
 *
 * # Invariants
 *
 * - The owner never appears in `participants`
 * - `participants` holds each user at most once
 * - `version` increases by one on every title or content change; roster and
 *   `is_active` changes leave it untouched
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A collaboration session record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    /// Unique session ID
    pub id: Uuid,
    /// Display title
    pub title: String,
    /// Shared document body (plain text or markdown)
    pub content: String,
    /// User who created the session
    pub owner_id: Uuid,
    /// Non-owner users with read/write access
    pub participants: Vec<Uuid>,
    /// Inactive sessions accept no new members
    pub is_active: bool,
    /// Optimistic concurrency stamp
    pub version: i64,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation, including joins and chat
    pub last_activity: DateTime<Utc>,
}

/// The caller's relationship to a session
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Owner,
    Participant,
    None,
}

impl Role {
    /// True for owners and participants
    pub fn is_member(self) -> bool {
        !matches!(self, Role::None)
    }
}

impl Session {
    /// Derive the caller's role by comparing identifiers
    pub fn role_of(&self, user_id: Uuid) -> Role {
        if self.owner_id == user_id {
            Role::Owner
        } else if self.participants.contains(&user_id) {
            Role::Participant
        } else {
            Role::None
        }
    }

    /// Summary row for list views
    pub fn summary_for(&self, user_id: Uuid) -> SessionSummary {
        SessionSummary {
            id: self.id,
            title: self.title.clone(),
            owner_id: self.owner_id,
            role: self.role_of(user_id),
            participant_count: self.participants.len(),
            is_active: self.is_active,
            version: self.version,
            last_activity: self.last_activity,
        }
    }
}

/// Lightweight session row returned by the list endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionSummary {
    pub id: Uuid,
    pub title: String,
    pub owner_id: Uuid,
    pub role: Role,
    pub participant_count: usize,
    pub is_active: bool,
    pub version: i64,
    pub last_activity: DateTime<Utc>,
}

/// A session together with the caller's role in it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionView {
    pub session: Session,
    pub role: Role,
}

/// Create session request
///
/// Both fields are optional so a client can create a session on its first
/// save action with whatever it already has.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Update session request
///
/// `participants` and `is_active` are owner-only. When `expected_version` is
/// present the write only applies if it matches the stored version.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSessionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participants: Option<Vec<Uuid>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_version: Option<i64>,
}

impl UpdateSessionRequest {
    /// True if the request touches owner-only fields
    pub fn touches_owner_fields(&self) -> bool {
        self.participants.is_some() || self.is_active.is_some()
    }

    /// True if the request changes nothing
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.participants.is_none()
            && self.is_active.is_none()
    }
}

/// List sessions response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSessionsResponse {
    pub sessions: Vec<SessionSummary>,
}
