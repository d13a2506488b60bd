//! Session access control.
//!
//! Every request re-loads the session and re-derives the caller's role by
//! comparing identifiers. Nothing is cached between requests.

use uuid::Uuid;

use crate::backend::collab::store::SessionStore;
use crate::backend::error::BackendError;
use crate::shared::{Role, Session};

/// Load a session or fail with 404
pub async fn load_session(store: &dyn SessionStore, id: Uuid) -> Result<Session, BackendError> {
    store
        .get_session(id)
        .await?
        .ok_or_else(BackendError::session_not_found)
}

/// Require the caller to be the owner or a participant
pub fn require_member(session: &Session, user_id: Uuid) -> Result<Role, BackendError> {
    match session.role_of(user_id) {
        Role::None => {
            tracing::warn!("[Access] User {} is not a member of session {}", user_id, session.id);
            Err(BackendError::forbidden("You are not a member of this session"))
        }
        role => Ok(role),
    }
}

/// Require the caller to be the owner
pub fn require_owner(session: &Session, user_id: Uuid, action: &str) -> Result<(), BackendError> {
    if session.role_of(user_id) == Role::Owner {
        Ok(())
    } else {
        tracing::warn!("[Access] User {} tried to {} session {} without owning it", user_id, action, session.id);
        Err(BackendError::forbidden(format!("Only the owner can {} this session", action)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::collab::memory::MemorySessionStore;
    use crate::backend::collab::store::NewSession;
    use axum::http::StatusCode;

    async fn seeded() -> (MemorySessionStore, Session, Uuid) {
        let store = MemorySessionStore::new();
        let session = store
            .create_session(NewSession {
                title: "History".into(),
                content: String::new(),
                owner_id: Uuid::new_v4(),
            })
            .await
            .unwrap();
        let member = Uuid::new_v4();
        let (session, _) = store.add_participant(session.id, member).await.unwrap();
        (store, session, member)
    }

    #[tokio::test]
    async fn test_load_missing_session_is_404() {
        let store = MemorySessionStore::new();
        let err = load_session(&store, Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_require_member() {
        let (_, session, member) = seeded().await;
        assert_eq!(require_member(&session, session.owner_id).unwrap(), Role::Owner);
        assert_eq!(require_member(&session, member).unwrap(), Role::Participant);
        let err = require_member(&session, Uuid::new_v4()).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_require_owner_rejects_participant() {
        let (_, session, member) = seeded().await;
        assert!(require_owner(&session, session.owner_id, "delete").is_ok());
        let err = require_owner(&session, member, "delete").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert!(err.message().contains("delete"));
    }
}
