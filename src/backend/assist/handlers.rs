/**
 * AI Assist Handlers
 *
 * - GET  /api/sessions/{id}/assist - caller's quota for today
 * - POST /api/sessions/{id}/assist - run an assist request
 */

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use uuid::Uuid;

use crate::backend::assist::gate::run_assist;
use crate::backend::assist::quota::{usage_for, UsageKey};
use crate::backend::collab::access::{load_session, require_member};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::{AssistOutcome, AssistRequest, AssistUsage};

pub async fn get_assist_usage(
    State(state): State<AppState>,
    user: AuthUser,
    Path(session_id): Path<Uuid>,
) -> Result<Json<AssistUsage>, BackendError> {
    let session = load_session(state.store.as_ref(), session_id).await?;
    require_member(&session, user.id())?;

    let key = UsageKey::today(user.id(), session_id);
    let usage = usage_for(state.store.as_ref(), &key, state.settings.daily_assist_limit).await?;
    Ok(Json(usage))
}

pub async fn request_assist(
    State(state): State<AppState>,
    user: AuthUser,
    Path(session_id): Path<Uuid>,
    body: Result<Json<AssistRequest>, JsonRejection>,
) -> Result<Json<AssistOutcome>, BackendError> {
    let Json(request) = body?;
    let outcome = run_assist(&state, session_id, user.id(), &request.prompt).await?;
    Ok(Json(outcome))
}
