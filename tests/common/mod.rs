//! Common test utilities and helpers
//!
//! - `TestApp`: the real router over an in-memory store and a scripted
//!   assist provider, wrapped in an `axum-test` server
//! - Token helpers for minting bearer tokens
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use serde_json::json;
use studycollab::backend::assist::provider::{AssistError, AssistProvider};
use studycollab::backend::auth::JwtKeys;
use studycollab::backend::collab::memory::MemorySessionStore;
use studycollab::backend::routes::create_router;
use studycollab::backend::server::state::{AppState, CollabSettings};
use studycollab::shared::Session;
use uuid::Uuid;

pub const TEST_SECRET: &[u8] = b"integration-test-secret-0123456789";

/// What the scripted provider answers
#[derive(Debug, Clone)]
pub enum Script {
    Reply(String),
    Fail(u16),
    Empty,
}

/// Assist provider with a scripted answer and a call counter
pub struct ScriptedProvider {
    script: Mutex<Script>,
    calls: AtomicUsize,
    last_document: Mutex<Option<String>>,
}

impl ScriptedProvider {
    pub fn new(script: Script) -> Self {
        Self {
            script: Mutex::new(script),
            calls: AtomicUsize::new(0),
            last_document: Mutex::new(None),
        }
    }

    pub fn set(&self, script: Script) {
        *self.script.lock().unwrap() = script;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_document(&self) -> Option<String> {
        self.last_document.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssistProvider for ScriptedProvider {
    async fn generate(&self, _prompt: &str, document: &str) -> Result<String, AssistError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_document.lock().unwrap() = Some(document.to_string());
        match self.script.lock().unwrap().clone() {
            Script::Reply(text) => Ok(text),
            Script::Fail(status) => Err(AssistError::Upstream {
                status,
                body: "upstream failure".into(),
            }),
            Script::Empty => Err(AssistError::EmptyReply),
        }
    }
}

/// A running test server and handles into its state
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemorySessionStore>,
    pub provider: Arc<ScriptedProvider>,
    pub keys: JwtKeys,
    pub settings: CollabSettings,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_settings(CollabSettings::default())
    }

    pub fn with_settings(settings: CollabSettings) -> Self {
        let store = Arc::new(MemorySessionStore::new());
        let provider = Arc::new(ScriptedProvider::new(Script::Reply("Generated answer".into())));
        let keys = JwtKeys::from_secret(TEST_SECRET);
        let state = AppState::new(store.clone(), provider.clone(), keys.clone(), settings.clone());
        let server = TestServer::new(create_router(state)).unwrap();

        Self {
            server,
            store,
            provider,
            keys,
            settings,
        }
    }

    /// A fresh user id and its bearer token
    pub fn user(&self) -> (Uuid, String) {
        let id = Uuid::new_v4();
        let token = self.keys.create_token(id, None).unwrap();
        (id, token)
    }

    /// Create a session through the API and return it
    pub async fn create_session(&self, token: &str, title: &str, content: &str) -> Session {
        let response = self
            .server
            .post("/api/sessions")
            .authorization_bearer(token)
            .json(&json!({ "title": title, "content": content }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json::<Session>()
    }
}
