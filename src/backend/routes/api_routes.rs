/**
 * API Route Handlers
 *
 * Session API routes. Every route here sits behind `auth_middleware`.
 *
 * # Routes
 *
 * ## Sessions
 * - `POST   /api/sessions` - Create session
 * - `GET    /api/sessions` - List own and joined sessions
 * - `GET    /api/sessions/{id}` - View (auto-join when enabled)
 * - `PATCH  /api/sessions/{id}` - Update
 * - `DELETE /api/sessions/{id}` - Delete (owner)
 * - `POST   /api/sessions/{id}/join` - Join
 * - `POST   /api/sessions/{id}/leave` - Leave
 *
 * ## Chat
 * - `GET  /api/sessions/{id}/messages` - Poll messages (`since`)
 * - `POST /api/sessions/{id}/messages` - Send message or assist
 *
 * ## AI Assist
 * - `GET  /api/sessions/{id}/assist` - Today's usage
 * - `POST /api/sessions/{id}/assist` - Request assist
 */

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::backend::assist::handlers::{get_assist_usage, request_assist};
use crate::backend::chat::handlers::{list_messages, send_message};
use crate::backend::collab::handlers::{
    create_session, delete_session, get_session, join_session, leave_session, list_sessions,
    update_session,
};
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;

/// Configure the authenticated session API routes
pub fn configure_api_routes(app_state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/sessions", get(list_sessions).post(create_session))
        .route(
            "/api/sessions/{id}",
            get(get_session).patch(update_session).delete(delete_session),
        )
        .route("/api/sessions/{id}/join", post(join_session))
        .route("/api/sessions/{id}/leave", post(leave_session))
        .route(
            "/api/sessions/{id}/messages",
            get(list_messages).post(send_message),
        )
        .route(
            "/api/sessions/{id}/assist",
            get(get_assist_usage).post(request_assist),
        )
        .route_layer(from_fn_with_state(app_state.clone(), auth_middleware))
}
