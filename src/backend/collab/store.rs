/**
 * Session Store
 *
 * The persistence seam for collaboration sessions. Handlers only ever talk to
 * `dyn SessionStore`; the server picks the Postgres backend when a database
 * is configured and the in-memory backend otherwise.
 *
 * Every method is a single short operation. Methods that must be atomic
 * (`update_session` with a version check, `commit_assist`) are atomic inside
 * the backend, so callers never need a lock of their own.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::backend::assist::quota::UsageKey;
use crate::shared::{ChatMessage, Session};

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Session not found")]
    NotFound,

    /// The caller's `expected_version` no longer matches
    #[error("Session was modified concurrently (current version {current})")]
    VersionConflict { current: i64 },

    /// The atomic quota increment found the counter at its limit
    #[error("Daily AI-assist limit reached")]
    QuotaExhausted,

    #[error("Content would exceed {max_chars} characters")]
    ContentTooLarge { max_chars: usize },

    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            other => StoreError::Backend(other.to_string()),
        }
    }
}

/// A validated new session
#[derive(Debug, Clone)]
pub struct NewSession {
    pub title: String,
    pub content: String,
    pub owner_id: Uuid,
}

/// A validated partial update
///
/// `participants` replaces the whole roster. The owner has already been
/// checked not to be in it and duplicates have been removed.
#[derive(Debug, Clone, Default)]
pub struct SessionPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub participants: Option<Vec<Uuid>>,
    pub is_active: Option<bool>,
    pub expected_version: Option<i64>,
}

impl SessionPatch {
    /// True if the patch changes the document (and so bumps the version)
    pub fn changes_document(&self) -> bool {
        self.title.is_some() || self.content.is_some()
    }
}

/// Everything a successful assist call writes, applied as one unit
#[derive(Debug, Clone)]
pub struct AssistCommit {
    pub key: UsageKey,
    /// Daily ceiling; the counter is only incremented while below it
    pub limit: u32,
    /// Text appended to the document
    pub block: String,
    /// Content bound the appended document must respect
    pub max_content_chars: usize,
    /// System message recording the action
    pub note: ChatMessage,
}

/// Result of an applied `AssistCommit`
#[derive(Debug, Clone)]
pub struct AssistCommitted {
    pub session: Session,
    pub note: ChatMessage,
    /// Counter value after the increment
    pub used: u32,
}

/// Session persistence operations
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Insert a new session at version 1
    async fn create_session(&self, new: NewSession) -> Result<Session, StoreError>;

    async fn get_session(&self, id: Uuid) -> Result<Option<Session>, StoreError>;

    /// Sessions the user owns or participates in, most recently active first
    async fn list_sessions_for(&self, user_id: Uuid) -> Result<Vec<Session>, StoreError>;

    /// Apply a patch. Fails with `VersionConflict` if `expected_version` is
    /// set and stale.
    async fn update_session(&self, id: Uuid, patch: SessionPatch) -> Result<Session, StoreError>;

    /// Add a participant. Idempotent; adding the owner is a no-op.
    /// Returns the session and whether the roster changed.
    async fn add_participant(&self, id: Uuid, user_id: Uuid) -> Result<(Session, bool), StoreError>;

    async fn remove_participant(&self, id: Uuid, user_id: Uuid) -> Result<Session, StoreError>;

    /// Delete a session with its messages and quota rows. Returns false if absent.
    async fn delete_session(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Append a message and return it as stored.
    ///
    /// The store assigns `created_at` at commit time, never earlier than the
    /// newest message already in the log.
    async fn append_message(&self, message: ChatMessage) -> Result<ChatMessage, StoreError>;

    /// Messages oldest first, optionally only those created at or after `since`
    async fn list_messages(
        &self,
        session_id: Uuid,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<ChatMessage>, StoreError>;

    /// Current assist counter for a key (0 when no row exists yet)
    async fn assist_count(&self, key: &UsageKey) -> Result<u32, StoreError>;

    /// Charge one assist call and append its result atomically.
    ///
    /// Fails with `QuotaExhausted` when the counter already reached `limit`
    /// and with `ContentTooLarge` when the block does not fit; in both cases
    /// nothing is written.
    async fn commit_assist(&self, commit: AssistCommit) -> Result<AssistCommitted, StoreError>;
}
