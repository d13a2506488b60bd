/**
 * AI Assist Provider
 *
 * The upstream text-generation seam. `OpenAiCompatProvider` talks to any
 * OpenAI-compatible Chat Completions endpoint; `DisabledProvider` stands in
 * when no API key is configured.
 *
 * Providers never touch the quota. A provider error always means the call
 * is not charged.
 */

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Instruction sent ahead of every prompt
const SYSTEM_PROMPT: &str = "You are a study assistant embedded in a shared document. \
Answer the user's request concisely in markdown. The current document is provided for context.";

/// Upstream failures
#[derive(Debug, Error)]
pub enum AssistError {
    #[error("AI assistant is not configured")]
    NotConfigured,

    #[error("AI provider request failed: {0}")]
    Transport(String),

    /// Any non-2xx answer, including upstream rate limiting
    #[error("AI provider returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("AI provider returned an empty reply")]
    EmptyReply,
}

/// Text generation for the assist gate
#[async_trait]
pub trait AssistProvider: Send + Sync {
    /// Generate a reply for `prompt` with the current `document` as context
    async fn generate(&self, prompt: &str, document: &str) -> Result<String, AssistError>;
}

/// Provider used when no API key is configured
#[derive(Debug, Default, Clone)]
pub struct DisabledProvider;

#[async_trait]
impl AssistProvider for DisabledProvider {
    async fn generate(&self, _prompt: &str, _document: &str) -> Result<String, AssistError> {
        Err(AssistError::NotConfigured)
    }
}

/// Chat Completions client for OpenAI-compatible APIs
#[derive(Clone)]
pub struct OpenAiCompatProvider {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiCompatProvider {
    /// `api_url` is the API base, e.g. `https://api.openai.com/v1`
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AssistError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AssistError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_url)
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<RequestMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

fn extract_reply(response: ChatCompletionResponse) -> Result<String, AssistError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or(AssistError::EmptyReply)
}

#[async_trait]
impl AssistProvider for OpenAiCompatProvider {
    async fn generate(&self, prompt: &str, document: &str) -> Result<String, AssistError> {
        let context = format!("Current document:\n\n{}", document);
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                RequestMessage { role: "system", content: SYSTEM_PROMPT },
                RequestMessage { role: "system", content: &context },
                RequestMessage { role: "user", content: prompt },
            ],
        };

        tracing::debug!(
            "[Assist] Calling {} (prompt {} chars, document {} chars)",
            self.model,
            prompt.chars().count(),
            document.chars().count()
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AssistError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!("[Assist] Provider returned {}", status);
            return Err(AssistError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AssistError::Transport(format!("invalid response body: {}", e)))?;

        extract_reply(parsed)
    }
}
