/**
 * Authentication Middleware
 *
 * Protects the session API. It extracts and verifies the JWT from the
 * Authorization header and stores the caller's identity in the request
 * extensions for the `AuthUser` extractor.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::auth::JwtKeys;
use crate::backend::error::BackendError;

/// Authenticated user data extracted from the JWT
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

/// Pull the bearer token out of an Authorization header value
fn bearer_token(header: Option<&str>) -> Result<&str, BackendError> {
    let header = header.ok_or_else(|| {
        tracing::warn!("[Auth] Missing Authorization header");
        BackendError::unauthorized("Missing Authorization header")
    })?;

    header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("[Auth] Invalid Authorization header format");
        BackendError::unauthorized("Authorization header must be a Bearer token")
    })
}

/// Authentication middleware
///
/// Returns 401 with a JSON body if the token is missing, malformed, expired
/// or carries a subject that is not a UUID.
pub async fn auth_middleware(
    State(jwt): State<JwtKeys>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());
    let token = bearer_token(header)?;

    let user_id = jwt.user_id_from_token(token).map_err(|e| {
        tracing::warn!("[Auth] {}", e);
        BackendError::unauthorized("Invalid or expired token")
    })?;

    request.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user set by `auth_middleware`
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl AuthUser {
    pub fn id(&self) -> Uuid {
        self.0.user_id
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("[Auth] AuthenticatedUser not found in request extensions");
                BackendError::unauthorized("Authentication required")
            })?;

        Ok(AuthUser(user))
    }
}
