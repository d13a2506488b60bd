/**
 * Session API Client
 *
 * Typed async calls for every session endpoint. Each call sends the bearer
 * token and turns non-2xx answers into `ClientError::Api` using the server's
 * `{"error", "status"}` body.
 */

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::shared::{
    AssistOutcome, AssistRequest, AssistUsage, ChatMessage, CreateSessionRequest,
    ListMessagesResponse, ListSessionsResponse, SendMessageRequest, SendMessageResponse, Session,
    SessionSummary, SessionView, UpdateSessionRequest,
};

/// Client-side errors
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an error status
    #[error("Server returned {status}: {message}")]
    Api { status: u16, message: String },
}

impl ClientError {
    /// HTTP status for `Api` errors
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for one user of the session API
#[derive(Clone)]
pub struct CollabClient {
    http: Client,
    base_url: String,
    token: String,
}

impl CollabClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_http_client(Client::new(), base_url, token)
    }

    /// Use a preconfigured reqwest client (timeouts, proxies)
    pub fn with_http_client(
        http: Client,
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn session_url(&self, id: Uuid, suffix: &str) -> String {
        self.url(&format!("/api/sessions/{}{}", id, suffix))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.bearer_auth(&self.token).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or(text);
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        Ok(self.send(request).await?.json().await?)
    }

    pub async fn create_session(&self, request: &CreateSessionRequest) -> Result<Session, ClientError> {
        self.send_json(self.http.post(self.url("/api/sessions")).json(request))
            .await
    }

    pub async fn list_sessions(&self) -> Result<Vec<SessionSummary>, ClientError> {
        let body: ListSessionsResponse = self.send_json(self.http.get(self.url("/api/sessions"))).await?;
        Ok(body.sessions)
    }

    /// View a session (may join the caller as a participant)
    pub async fn get_session(&self, id: Uuid) -> Result<SessionView, ClientError> {
        self.send_json(self.http.get(self.session_url(id, ""))).await
    }

    pub async fn update_session(
        &self,
        id: Uuid,
        request: &UpdateSessionRequest,
    ) -> Result<Session, ClientError> {
        self.send_json(self.http.patch(self.session_url(id, "")).json(request))
            .await
    }

    pub async fn delete_session(&self, id: Uuid) -> Result<(), ClientError> {
        self.send(self.http.delete(self.session_url(id, ""))).await?;
        Ok(())
    }

    pub async fn join_session(&self, id: Uuid) -> Result<SessionView, ClientError> {
        self.send_json(self.http.post(self.session_url(id, "/join"))).await
    }

    pub async fn leave_session(&self, id: Uuid) -> Result<(), ClientError> {
        self.send(self.http.post(self.session_url(id, "/leave"))).await?;
        Ok(())
    }

    /// Messages created at or after `since` (all when `None`)
    pub async fn list_messages(
        &self,
        id: Uuid,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<ChatMessage>, ClientError> {
        let mut request = self.http.get(self.session_url(id, "/messages"));
        if let Some(since) = since {
            request = request.query(&[("since", since.to_rfc3339_opts(SecondsFormat::AutoSi, true))]);
        }
        let body: ListMessagesResponse = self.send_json(request).await?;
        Ok(body.messages)
    }

    pub async fn send_message(
        &self,
        id: Uuid,
        text: impl Into<String>,
        assist: bool,
    ) -> Result<SendMessageResponse, ClientError> {
        let body = SendMessageRequest {
            text: text.into(),
            assist,
        };
        self.send_json(self.http.post(self.session_url(id, "/messages")).json(&body))
            .await
    }

    pub async fn assist_usage(&self, id: Uuid) -> Result<AssistUsage, ClientError> {
        self.send_json(self.http.get(self.session_url(id, "/assist"))).await
    }

    pub async fn request_assist(
        &self,
        id: Uuid,
        prompt: impl Into<String>,
    ) -> Result<AssistOutcome, ClientError> {
        let body = AssistRequest { prompt: prompt.into() };
        self.send_json(self.http.post(self.session_url(id, "/assist")).json(&body))
            .await
    }
}
