/**
 * Chat Message Handlers
 *
 * - GET  /api/sessions/{id}/messages?since=<RFC3339> - poll the chat log
 * - POST /api/sessions/{id}/messages                 - send a message
 *
 * The log is append-only. A send with `assist: true` is routed through the
 * AI assist gate instead of being stored as a user message.
 */

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::backend::assist::gate::run_assist;
use crate::backend::collab::access::{load_session, require_member};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::{
    ChatMessage, ListMessagesParams, ListMessagesResponse, SendMessageRequest,
    SendMessageResponse,
};

/// List messages oldest first, optionally from `since` (inclusive)
pub async fn list_messages(
    State(state): State<AppState>,
    user: AuthUser,
    Path(session_id): Path<Uuid>,
    params: Result<Query<ListMessagesParams>, QueryRejection>,
) -> Result<Json<ListMessagesResponse>, BackendError> {
    let Query(params) = params?;
    let session = load_session(state.store.as_ref(), session_id).await?;
    require_member(&session, user.id())?;

    let messages = state.store.list_messages(session_id, params.since).await?;
    tracing::debug!(
        "[Chat] {} messages for session {} since {:?}",
        messages.len(),
        session_id,
        params.since
    );
    Ok(Json(ListMessagesResponse { messages }))
}

/// Append a user message, or run an assist request when `assist` is set
pub async fn send_message(
    State(state): State<AppState>,
    user: AuthUser,
    Path(session_id): Path<Uuid>,
    body: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SendMessageResponse>), BackendError> {
    let Json(request) = body?;

    if request.assist {
        let outcome = run_assist(&state, session_id, user.id(), &request.text).await?;
        return Ok((StatusCode::CREATED, Json(SendMessageResponse::Assist(outcome))));
    }

    let session = load_session(state.store.as_ref(), session_id).await?;
    require_member(&session, user.id())?;

    let text = state.settings.limits.validate_message_text("text", &request.text)?;
    let message = state
        .store
        .append_message(ChatMessage::user(session_id, user.id(), text))
        .await?;

    tracing::info!(
        "[Chat] User {} posted {} chars in session {}",
        user.id(),
        message.text.chars().count(),
        session_id
    );
    Ok((StatusCode::CREATED, Json(SendMessageResponse::Message(message))))
}
