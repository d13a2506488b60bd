/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including state creation, database loading, and route configuration.
 *
 * # Initialization Process
 *
 * 1. The caller loads `ServerConfig` (defaults, TOML file, environment)
 * 2. Connect to PostgreSQL if configured, else fall back to memory
 * 3. Build the assist provider (disabled without an API key)
 * 4. Assemble `AppState` and the router
 */

use std::sync::Arc;
use std::time::Duration;

use axum::Router;

use crate::backend::assist::provider::{AssistProvider, DisabledProvider, OpenAiCompatProvider};
use crate::backend::auth::JwtKeys;
use crate::backend::collab::db::PgSessionStore;
use crate::backend::collab::memory::MemorySessionStore;
use crate::backend::collab::store::SessionStore;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::{AppState, CollabSettings};

/// Create and configure the Axum application for a loaded configuration
pub async fn create_app(config: &ServerConfig) -> Router<()> {
    let state = build_state(config).await;
    create_router(state)
}

/// Build `AppState` for a loaded configuration
///
/// # Error Handling
///
/// The function is designed to be resilient:
/// - Missing or unreachable database: sessions are kept in memory
/// - Missing API key: assist requests answer 503
pub async fn build_state(config: &ServerConfig) -> AppState {
    tracing::info!("Initializing studycollab backend server");

    let store: Arc<dyn SessionStore> = match load_database(config.database.url.as_deref()).await {
        Some(pool) => {
            tracing::info!("Using PostgreSQL session store");
            Arc::new(PgSessionStore::new(pool))
        }
        None => {
            tracing::warn!("Using in-memory session store; data is lost on restart");
            Arc::new(MemorySessionStore::new())
        }
    };

    let assist = build_provider(config);

    if config.uses_dev_secret() {
        tracing::warn!("[Auth] JWT_SECRET not set, using the development secret");
    }
    let jwt = JwtKeys::from_secret(config.auth.jwt_secret.as_bytes());

    tracing::info!(
        "Daily assist limit {}, auto-join on view {}",
        config.assist.daily_limit,
        config.access.auto_join_on_view
    );

    AppState::new(store, assist, jwt, CollabSettings::from_config(config))
}

fn build_provider(config: &ServerConfig) -> Arc<dyn AssistProvider> {
    let Some(api_key) = config.assist.api_key.as_deref() else {
        tracing::warn!("[Assist] ASSIST_API_KEY not set, AI assist is disabled");
        return Arc::new(DisabledProvider);
    };

    match OpenAiCompatProvider::new(
        &config.assist.api_url,
        api_key,
        &config.assist.model,
        Duration::from_secs(config.assist.timeout_secs),
    ) {
        Ok(provider) => {
            tracing::info!("[Assist] Using model {} at {}", config.assist.model, config.assist.api_url);
            Arc::new(provider)
        }
        Err(e) => {
            tracing::error!("[Assist] Failed to build provider client: {}", e);
            Arc::new(DisabledProvider)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_build_state_without_database_uses_memory() {
        let config = ServerConfig::default();
        let state = build_state(&config).await;

        let sessions = state.store.list_sessions_for(Uuid::new_v4()).await.unwrap();
        assert!(sessions.is_empty());
        assert_eq!(state.settings.daily_assist_limit, config.assist.daily_limit);
    }

    #[tokio::test]
    async fn test_build_state_without_key_disables_assist() {
        let state = build_state(&ServerConfig::default()).await;
        let err = state.assist.generate("hi", "").await.unwrap_err();
        assert!(matches!(err, crate::backend::assist::AssistError::NotConfigured));
    }
}
