/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` is built once in `create_app` and cloned into every request.
 * It holds:
 * - The session store (Postgres or in-memory)
 * - The AI assist provider
 * - JWT verification keys
 * - Validation and quota settings
 *
 * Nothing in here caches session data; every request reloads the session
 * from the store.
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::assist::provider::AssistProvider;
use crate::backend::auth::JwtKeys;
use crate::backend::collab::store::SessionStore;
use crate::backend::server::config::ServerConfig;
use crate::shared::Limits;

/// Request-time settings derived from `ServerConfig`
#[derive(Debug, Clone)]
pub struct CollabSettings {
    pub limits: Limits,
    pub daily_assist_limit: u32,
    /// Promote a non-member to participant when they view a session
    pub auto_join_on_view: bool,
}

impl CollabSettings {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            limits: config.limits,
            daily_assist_limit: config.assist.daily_limit,
            auto_join_on_view: config.access.auto_join_on_view,
        }
    }
}

impl Default for CollabSettings {
    fn default() -> Self {
        Self::from_config(&ServerConfig::default())
    }
}

/// Application state shared by all handlers
///
/// # Fields
///
/// * `store` - Session persistence
/// * `assist` - Upstream text generation
/// * `jwt` - Bearer-token verification keys
/// * `settings` - Validation bounds, quota limit, access flags
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SessionStore>,
    pub assist: Arc<dyn AssistProvider>,
    pub jwt: JwtKeys,
    pub settings: CollabSettings,
}

impl AppState {
    pub fn new(
        store: Arc<dyn SessionStore>,
        assist: Arc<dyn AssistProvider>,
        jwt: JwtKeys,
        settings: CollabSettings,
    ) -> Self {
        Self {
            store,
            assist,
            jwt,
            settings,
        }
    }
}

/// Lets `auth_middleware` extract only the keys with `State(JwtKeys)`
impl FromRef<AppState> for JwtKeys {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.jwt.clone()
    }
}
