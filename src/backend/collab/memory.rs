/**
 * In-Memory Session Store
 *
 * Keeps sessions, messages and assist counters in process memory behind a
 * single `RwLock`. Used when no database is configured and by the test
 * suite. Every mutating method holds the write lock for its whole body, so
 * each call is atomic with respect to every other call.
 *
 * Messages are stamped under the lock and never earlier than the newest
 * message already logged, so each log is sorted by `created_at`.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::assist::quota::UsageKey;
use crate::backend::collab::store::{
    AssistCommit, AssistCommitted, NewSession, SessionPatch, SessionStore, StoreError,
};
use crate::shared::{ChatMessage, Session};

#[derive(Debug, Default)]
struct Inner {
    sessions: HashMap<Uuid, Session>,
    messages: HashMap<Uuid, Vec<ChatMessage>>,
    usage: HashMap<UsageKey, u32>,
}

/// Session store backed by process memory
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemorySessionStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }
}

/// Timestamp for the next entry of `log`
fn next_stamp(log: &[ChatMessage]) -> DateTime<Utc> {
    let now = Utc::now();
    match log.last() {
        Some(last) if last.created_at > now => last.created_at,
        _ => now,
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create_session(&self, new: NewSession) -> Result<Session, StoreError> {
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4(),
            title: new.title,
            content: new.content,
            owner_id: new.owner_id,
            participants: Vec::new(),
            is_active: true,
            version: 1,
            created_at: now,
            last_activity: now,
        };

        let mut inner = self.inner.write().await;
        inner.messages.insert(session.id, Vec::new());
        inner.sessions.insert(session.id, session.clone());
        Ok(session)
    }

    async fn get_session(&self, id: Uuid) -> Result<Option<Session>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.sessions.get(&id).cloned())
    }

    async fn list_sessions_for(&self, user_id: Uuid) -> Result<Vec<Session>, StoreError> {
        let inner = self.inner.read().await;
        let mut sessions: Vec<Session> = inner
            .sessions
            .values()
            .filter(|s| s.role_of(user_id).is_member())
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.last_activity.cmp(&a.last_activity));
        Ok(sessions)
    }

    async fn update_session(&self, id: Uuid, patch: SessionPatch) -> Result<Session, StoreError> {
        let mut inner = self.inner.write().await;
        let session = inner.sessions.get_mut(&id).ok_or(StoreError::NotFound)?;

        if let Some(expected) = patch.expected_version {
            if expected != session.version {
                return Err(StoreError::VersionConflict { current: session.version });
            }
        }

        let bump = patch.changes_document();
        if let Some(title) = patch.title {
            session.title = title;
        }
        if let Some(content) = patch.content {
            session.content = content;
        }
        if let Some(participants) = patch.participants {
            session.participants = participants;
        }
        if let Some(is_active) = patch.is_active {
            session.is_active = is_active;
        }
        if bump {
            session.version += 1;
        }
        session.last_activity = Utc::now();

        Ok(session.clone())
    }

    async fn add_participant(&self, id: Uuid, user_id: Uuid) -> Result<(Session, bool), StoreError> {
        let mut inner = self.inner.write().await;
        let session = inner.sessions.get_mut(&id).ok_or(StoreError::NotFound)?;

        if session.owner_id == user_id || session.participants.contains(&user_id) {
            return Ok((session.clone(), false));
        }

        session.participants.push(user_id);
        session.last_activity = Utc::now();
        Ok((session.clone(), true))
    }

    async fn remove_participant(&self, id: Uuid, user_id: Uuid) -> Result<Session, StoreError> {
        let mut inner = self.inner.write().await;
        let session = inner.sessions.get_mut(&id).ok_or(StoreError::NotFound)?;

        let before = session.participants.len();
        session.participants.retain(|p| *p != user_id);
        if session.participants.len() != before {
            session.last_activity = Utc::now();
        }
        Ok(session.clone())
    }

    async fn delete_session(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        let existed = inner.sessions.remove(&id).is_some();
        inner.messages.remove(&id);
        inner.usage.retain(|key, _| key.session_id != id);
        Ok(existed)
    }

    async fn append_message(&self, mut message: ChatMessage) -> Result<ChatMessage, StoreError> {
        let mut inner = self.inner.write().await;
        let Inner { sessions, messages, .. } = &mut *inner;

        let session = sessions
            .get_mut(&message.session_id)
            .ok_or(StoreError::NotFound)?;

        let log = messages.entry(message.session_id).or_default();
        message.created_at = next_stamp(log);
        session.last_activity = message.created_at;
        log.push(message.clone());
        Ok(message)
    }

    async fn list_messages(
        &self,
        session_id: Uuid,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<ChatMessage>, StoreError> {
        let inner = self.inner.read().await;
        if !inner.sessions.contains_key(&session_id) {
            return Err(StoreError::NotFound);
        }

        let messages = inner
            .messages
            .get(&session_id)
            .map(|log| {
                log.iter()
                    .filter(|m| since.map_or(true, |since| m.created_at >= since))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(messages)
    }

    async fn assist_count(&self, key: &UsageKey) -> Result<u32, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.usage.get(key).copied().unwrap_or(0))
    }

    async fn commit_assist(&self, mut commit: AssistCommit) -> Result<AssistCommitted, StoreError> {
        let mut inner = self.inner.write().await;
        let Inner { sessions, messages, usage } = &mut *inner;

        let session = sessions
            .get_mut(&commit.key.session_id)
            .ok_or(StoreError::NotFound)?;

        let used = usage.get(&commit.key).copied().unwrap_or(0);
        if used >= commit.limit {
            return Err(StoreError::QuotaExhausted);
        }

        let new_len = session.content.chars().count() + commit.block.chars().count();
        if new_len > commit.max_content_chars {
            return Err(StoreError::ContentTooLarge { max_chars: commit.max_content_chars });
        }

        let log = messages.entry(commit.key.session_id).or_default();
        commit.note.created_at = next_stamp(log);

        usage.insert(commit.key, used + 1);
        session.content.push_str(&commit.block);
        session.version += 1;
        session.last_activity = commit.note.created_at;
        log.push(commit.note.clone());

        Ok(AssistCommitted {
            session: session.clone(),
            note: commit.note,
            used: used + 1,
        })
    }
}
