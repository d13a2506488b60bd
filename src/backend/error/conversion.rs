/**
 * Error Conversion
 *
 * Renders a `BackendError` as an HTTP response so handlers can return it
 * directly.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "Error message",
 *   "status": 403
 * }
 * ```
 */

use axum::{
    response::{Response, IntoResponse},
    Json,
};
use serde::{Deserialize, Serialize};
use crate::backend::error::types::BackendError;

/// JSON error body returned for every failed request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    pub status: u16,
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!("Request failed with {}: {}", status, self);
        } else {
            tracing::debug!("Request rejected with {}: {}", status, message);
        }

        let body = ErrorBody {
            error: message,
            status: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_error_renders_json_body() {
        let response = BackendError::forbidden("Only the owner can delete a session").into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.status, 403);
        assert_eq!(body.error, "Only the owner can delete a session");
    }
}
