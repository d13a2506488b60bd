/**
 * AI Assist Gate
 *
 * The one path through which an assist request reaches the upstream model:
 *
 * 1. Load the session and check membership
 * 2. Validate the prompt
 * 3. Refuse with 429 when today's counter is at the limit (no upstream call)
 * 4. Call the provider; any failure is a 500 and nothing is charged
 * 5. Charge and append in one atomic store step
 *
 * Step 5 re-checks the limit, so two concurrent requests racing for the last
 * slot cannot both be charged.
 */

use uuid::Uuid;

use crate::backend::assist::quota::{usage_for, UsageKey};
use crate::backend::collab::access::{load_session, require_member};
use crate::backend::collab::store::{AssistCommit, StoreError};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::assist::{assist_block, ASSIST_SYSTEM_NOTE};
use crate::shared::{AssistOutcome, AssistUsage, ChatMessage};

/// Run one assist request for `user_id` in `session_id`
pub async fn run_assist(
    state: &AppState,
    session_id: Uuid,
    user_id: Uuid,
    prompt: &str,
) -> Result<AssistOutcome, BackendError> {
    let store = state.store.as_ref();
    let limit = state.settings.daily_assist_limit;

    let session = load_session(store, session_id).await?;
    require_member(&session, user_id)?;

    let prompt = state.settings.limits.validate_message_text("prompt", prompt)?;

    let key = UsageKey::today(user_id, session_id);
    let usage = usage_for(store, &key, limit).await?;
    if usage.is_exhausted() {
        tracing::info!(
            "[Assist] User {} reached the daily limit ({}) in session {}",
            user_id,
            limit,
            session_id
        );
        return Err(BackendError::quota_exceeded(limit));
    }

    let reply = state
        .assist
        .generate(&prompt, &session.content)
        .await
        .map_err(|e| {
            tracing::warn!("[Assist] Upstream call failed for session {}: {}", session_id, e);
            BackendError::from(e)
        })?;

    let note = ChatMessage::system(
        session_id,
        format!("{} (requested by {})", ASSIST_SYSTEM_NOTE, user_id),
    );
    let commit = AssistCommit {
        key,
        limit,
        block: assist_block(&reply),
        max_content_chars: state.settings.limits.max_content_chars,
        note,
    };

    let committed = store.commit_assist(commit).await.map_err(|e| match e {
        StoreError::QuotaExhausted => {
            tracing::info!("[Assist] Lost the last quota slot to a concurrent request in session {}", session_id);
            BackendError::quota_exceeded(limit)
        }
        other => BackendError::from(other),
    })?;

    tracing::info!(
        "[Assist] Appended {} chars to session {} ({}/{} used today)",
        reply.chars().count(),
        session_id,
        committed.used,
        limit
    );

    Ok(AssistOutcome {
        reply,
        session: committed.session,
        message: committed.note,
        usage: AssistUsage::new(key.day, committed.used, limit),
    })
}
