/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Public routes (`/health`)
 * 2. Authenticated API routes (`/api/sessions/...`)
 * 3. JSON 404 fallback
 *
 * `TraceLayer` wraps everything, so every request is logged including the
 * ones rejected by authentication.
 */

use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn not_found() -> BackendError {
    BackendError::handler(StatusCode::NOT_FOUND, "Route not found")
}

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Store, provider, JWT keys and settings
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    Router::new()
        .route("/health", get(health))
        .merge(configure_api_routes(&app_state))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::backend::assist::provider::DisabledProvider;
    use crate::backend::auth::JwtKeys;
    use crate::backend::collab::memory::MemorySessionStore;
    use crate::backend::server::state::CollabSettings;

    const SECRET: &[u8] = b"router-test-secret-1234";

    fn app() -> Router {
        create_router(AppState::new(
            Arc::new(MemorySessionStore::new()),
            Arc::new(DisabledProvider),
            JwtKeys::from_secret(SECRET),
            CollabSettings::default(),
        ))
    }

    fn get_sessions(token: &str) -> Request<Body> {
        Request::builder()
            .uri("/api/sessions")
            .header("authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_sessions_require_token() {
        let response = app()
            .oneshot(Request::builder().uri("/api/sessions").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["status"], 401);
    }

    #[tokio::test]
    async fn test_valid_token_reaches_handler() {
        let token = JwtKeys::from_secret(SECRET).create_token(uuid::Uuid::new_v4(), None).unwrap();
        let response = app().oneshot(get_sessions(&token)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_non_uuid_subject_is_401() {
        use crate::backend::auth::tokens::Claims;
        use jsonwebtoken::{encode, EncodingKey, Header};

        let now = u64::try_from(chrono::Utc::now().timestamp()).unwrap();
        let claims = Claims { sub: "not-a-uuid".into(), email: None, exp: now + 60, iat: now };
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET)).unwrap();

        let response = app().oneshot(get_sessions(&token)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let response = app()
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "Route not found");
    }
}
