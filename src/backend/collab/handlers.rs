/**
 * Session Handlers
 *
 * CRUD and roster endpoints for collaboration sessions:
 * - POST   /api/sessions            - create (caller becomes owner)
 * - GET    /api/sessions            - list sessions owned or joined
 * - GET    /api/sessions/{id}       - view, joining when allowed
 * - PATCH  /api/sessions/{id}       - update title/content/roster/active flag
 * - DELETE /api/sessions/{id}       - delete (owner only)
 * - POST   /api/sessions/{id}/join  - join as participant
 * - POST   /api/sessions/{id}/leave - leave (participants only)
 *
 * Every handler reloads the session and re-derives the caller's role.
 */

use std::collections::HashSet;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::backend::collab::access::{load_session, require_member, require_owner};
use crate::backend::collab::store::{NewSession, SessionPatch};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::limits::DEFAULT_TITLE;
use crate::shared::{
    CreateSessionRequest, ListSessionsResponse, Role, Session, SessionView, SharedError,
    UpdateSessionRequest,
};

/// Drop repeated ids, keeping first occurrences in order
fn dedupe(ids: Vec<Uuid>) -> Vec<Uuid> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

fn inactive(session: &Session) -> BackendError {
    tracing::debug!("[Sessions] Session {} is not active", session.id);
    BackendError::forbidden("This session is not active")
}

/// Create a session owned by the caller
pub async fn create_session(
    State(state): State<AppState>,
    user: AuthUser,
    body: Result<Json<CreateSessionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Session>), BackendError> {
    let Json(request) = body?;
    let limits = &state.settings.limits;

    let title = match request.title.as_deref() {
        Some(title) => limits.validate_title(title)?,
        None => DEFAULT_TITLE.to_string(),
    };
    let content = request.content.unwrap_or_default();
    limits.validate_content(&content)?;

    let session = state
        .store
        .create_session(NewSession {
            title,
            content,
            owner_id: user.id(),
        })
        .await?;

    tracing::info!("[Sessions] User {} created session {}", user.id(), session.id);
    Ok((StatusCode::CREATED, Json(session)))
}

/// List sessions the caller owns or participates in
pub async fn list_sessions(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ListSessionsResponse>, BackendError> {
    let sessions = state.store.list_sessions_for(user.id()).await?;
    let sessions = sessions.iter().map(|s| s.summary_for(user.id())).collect();
    Ok(Json(ListSessionsResponse { sessions }))
}

/// View a session
///
/// A caller with no role joins as a participant when `auto_join_on_view` is
/// on and the session is active; otherwise they get 403.
pub async fn get_session(
    State(state): State<AppState>,
    user: AuthUser,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionView>, BackendError> {
    let session = load_session(state.store.as_ref(), session_id).await?;

    match session.role_of(user.id()) {
        Role::None => {
            if !state.settings.auto_join_on_view {
                require_member(&session, user.id())?;
            }
            if !session.is_active {
                return Err(inactive(&session));
            }
            let (session, joined) = state.store.add_participant(session_id, user.id()).await?;
            if joined {
                tracing::info!("[Sessions] User {} joined session {} on view", user.id(), session_id);
            }
            Ok(Json(SessionView { session, role: Role::Participant }))
        }
        role => Ok(Json(SessionView { session, role })),
    }
}

/// Update a session
///
/// Owner and participants may edit `title` and `content`; only the owner may
/// replace `participants` or toggle `is_active`.
pub async fn update_session(
    State(state): State<AppState>,
    user: AuthUser,
    Path(session_id): Path<Uuid>,
    body: Result<Json<UpdateSessionRequest>, JsonRejection>,
) -> Result<Json<Session>, BackendError> {
    let Json(request) = body?;
    let session = load_session(state.store.as_ref(), session_id).await?;
    let role = require_member(&session, user.id())?;

    if request.touches_owner_fields() && role != Role::Owner {
        tracing::warn!(
            "[Sessions] Participant {} tried to change owner-only fields of {}",
            user.id(),
            session_id
        );
        return Err(BackendError::forbidden(
            "Only the owner can change participants or the active flag",
        ));
    }
    if request.is_empty() {
        return Err(SharedError::validation("body", "No fields to update").into());
    }

    let limits = &state.settings.limits;
    let title = request
        .title
        .as_deref()
        .map(|t| limits.validate_title(t))
        .transpose()?;
    if let Some(content) = &request.content {
        limits.validate_content(content)?;
    }
    let participants = match request.participants {
        Some(ids) if ids.contains(&session.owner_id) => {
            return Err(SharedError::validation(
                "participants",
                "The owner cannot be listed as a participant",
            )
            .into());
        }
        Some(ids) => Some(dedupe(ids)),
        None => None,
    };

    let patch = SessionPatch {
        title,
        content: request.content,
        participants,
        is_active: request.is_active,
        expected_version: request.expected_version,
    };
    let updated = state.store.update_session(session_id, patch).await?;

    tracing::info!(
        "[Sessions] User {} updated session {} (version {})",
        user.id(),
        session_id,
        updated.version
    );
    Ok(Json(updated))
}

/// Delete a session with its messages and quota counters
pub async fn delete_session(
    State(state): State<AppState>,
    user: AuthUser,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, BackendError> {
    let session = load_session(state.store.as_ref(), session_id).await?;
    require_owner(&session, user.id(), "delete")?;

    if !state.store.delete_session(session_id).await? {
        return Err(BackendError::session_not_found());
    }

    tracing::info!("[Sessions] User {} deleted session {}", user.id(), session_id);
    Ok(StatusCode::NO_CONTENT)
}

/// Join a session as a participant. Members get their current view back.
pub async fn join_session(
    State(state): State<AppState>,
    user: AuthUser,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionView>, BackendError> {
    let session = load_session(state.store.as_ref(), session_id).await?;

    match session.role_of(user.id()) {
        Role::None => {
            if !session.is_active {
                return Err(inactive(&session));
            }
            let (session, joined) = state.store.add_participant(session_id, user.id()).await?;
            if joined {
                tracing::info!("[Sessions] User {} joined session {}", user.id(), session_id);
            }
            Ok(Json(SessionView { session, role: Role::Participant }))
        }
        role => Ok(Json(SessionView { session, role })),
    }
}

/// Leave a session. The owner cannot leave; they delete instead.
pub async fn leave_session(
    State(state): State<AppState>,
    user: AuthUser,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, BackendError> {
    let session = load_session(state.store.as_ref(), session_id).await?;

    match require_member(&session, user.id())? {
        Role::Owner => Err(SharedError::validation(
            "participants",
            "The owner cannot leave their own session",
        )
        .into()),
        _ => {
            state.store.remove_participant(session_id, user.id()).await?;
            tracing::info!("[Sessions] User {} left session {}", user.id(), session_id);
            Ok(StatusCode::NO_CONTENT)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedupe_keeps_first_occurrence_order() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert_eq!(dedupe(vec![b, a, b, a]), vec![b, a]);
    }
}
