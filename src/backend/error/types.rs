/**
 * Backend Error Types
 *
 * This module defines the request-boundary error for the session API.
 * Every handler returns `Result<_, BackendError>`; the error is rendered as a
 * JSON body by the `conversion` module.
 *
 * # Error Categories
 *
 * - Validation (missing or oversized fields) - 400
 * - Authentication (missing or invalid token) - 401
 * - Authorization (caller lacks the role) - 403
 * - Not found - 404
 * - Stale version - 409
 * - Quota exceeded - 429
 * - Upstream or internal failure - 500
 */

use thiserror::Error;
use axum::http::StatusCode;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use crate::shared::SharedError;
use crate::backend::collab::store::StoreError;
use crate::backend::assist::provider::AssistError;

/// Backend-specific error types
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error carrying an explicit status (401, 403, 503, ...)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Storage backend error
    #[error(transparent)]
    StoreError(#[from] StoreError),

    /// The AI provider failed or returned nothing usable
    #[error("Upstream error: {message}")]
    UpstreamError {
        /// Human-readable error message
        message: String,
    },

    /// Daily AI-assist quota is used up
    #[error("Daily AI-assist limit of {limit} reached")]
    QuotaExceeded {
        /// The daily ceiling that was hit
        limit: u32,
    },

    /// Request validation error
    #[error(transparent)]
    SharedError(#[from] SharedError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// 401 with the given reason
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, message)
    }

    /// 403 with the given reason
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::FORBIDDEN, message)
    }

    /// 404 for a missing session
    pub fn session_not_found() -> Self {
        Self::StoreError(StoreError::NotFound)
    }

    /// Create a new upstream error
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::UpstreamError {
            message: message.into(),
        }
    }

    /// Create a quota error for the given daily limit
    pub fn quota_exceeded(limit: u32) -> Self {
        Self::QuotaExceeded { limit }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::StoreError(err) => match err {
                StoreError::NotFound => StatusCode::NOT_FOUND,
                StoreError::VersionConflict { .. } => StatusCode::CONFLICT,
                StoreError::QuotaExhausted => StatusCode::TOO_MANY_REQUESTS,
                StoreError::ContentTooLarge { .. } => StatusCode::BAD_REQUEST,
                StoreError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::UpstreamError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::QuotaExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::SharedError(SharedError::ValidationError { .. }) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            // Storage internals stay in the logs
            Self::StoreError(StoreError::Backend(_)) => "Internal storage error".to_string(),
            Self::StoreError(err) => err.to_string(),
            Self::UpstreamError { message } => message.clone(),
            Self::QuotaExceeded { .. } => self.to_string(),
            Self::SharedError(err) => err.to_string(),
        }
    }
}

impl From<AssistError> for BackendError {
    fn from(err: AssistError) -> Self {
        match err {
            AssistError::NotConfigured => {
                Self::handler(StatusCode::SERVICE_UNAVAILABLE, "AI assistant is not configured")
            }
            other => Self::upstream(other.to_string()),
        }
    }
}

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        Self::SharedError(SharedError::validation("body", rejection.body_text()))
    }
}

impl From<QueryRejection> for BackendError {
    fn from(rejection: QueryRejection) -> Self {
        Self::SharedError(SharedError::validation("query", rejection.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error() {
        let error = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid request");
        match error {
            BackendError::HandlerError { status, message } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message, "Invalid request");
            }
            _ => panic!("Expected HandlerError"),
        }
    }

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(BackendError::unauthorized("no token").status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(BackendError::forbidden("not a member").status_code(), StatusCode::FORBIDDEN);
        assert_eq!(BackendError::session_not_found().status_code(), StatusCode::NOT_FOUND);
        assert_eq!(BackendError::quota_exceeded(10).status_code(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(BackendError::upstream("boom").status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_store_error_mapping() {
        let conflict: BackendError = StoreError::VersionConflict { current: 4 }.into();
        assert_eq!(conflict.status_code(), StatusCode::CONFLICT);
        assert!(conflict.message().contains('4'));

        let exhausted: BackendError = StoreError::QuotaExhausted.into();
        assert_eq!(exhausted.status_code(), StatusCode::TOO_MANY_REQUESTS);

        let too_large: BackendError = StoreError::ContentTooLarge { max_chars: 10 }.into();
        assert_eq!(too_large.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_backend_store_error_hides_details() {
        let error: BackendError = StoreError::Backend("connection refused on 10.0.0.5".into()).into();
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!error.message().contains("10.0.0.5"));
    }

    #[test]
    fn test_from_shared_error() {
        let backend_error: BackendError = SharedError::validation("title", "empty").into();
        assert_eq!(backend_error.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_from_assist_error() {
        let not_configured: BackendError = AssistError::NotConfigured.into();
        assert_eq!(not_configured.status_code(), StatusCode::SERVICE_UNAVAILABLE);

        let upstream: BackendError = AssistError::Upstream { status: 429, body: "slow down".into() }.into();
        assert_eq!(upstream.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
