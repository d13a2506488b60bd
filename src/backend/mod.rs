//! Backend Module
//!
//! This module contains all server-side code for studycollab: an Axum HTTP
//! server hosting collaboration sessions with an embedded chat log and a
//! quota-gated AI assistant.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`collab`** - Sessions: store trait, Postgres and memory backends, handlers
//! - **`chat`** - Chat log handlers
//! - **`assist`** - AI-assist quota, provider and gate
//! - **`auth`** - JWT verification
//! - **`middleware`** - Request authentication
//! - **`error`** - Backend error type and JSON rendering
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Config, state, init
//! ├── routes/         - Route configuration
//! ├── collab/         - Sessions and access control
//! ├── chat/           - Chat handlers
//! ├── assist/         - AI assist
//! ├── auth/           - Tokens
//! ├── middleware/     - Auth middleware
//! └── error/          - Error types
//! ```
//!
//! # Request Model
//!
//! Every request is independent: authenticate, load the session from the
//! store, check the caller's role, apply the change, persist it. No session
//! data lives in process memory between requests (the in-memory store aside)
//! and nothing is pushed to clients; they poll.
//!
//! # Error Handling
//!
//! Handlers return `Result<_, BackendError>`. The error carries its HTTP
//! status and renders as `{"error": "...", "status": code}`.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Collaboration sessions
pub mod collab;

/// Session chat log
pub mod chat;

/// AI assist quota and gate
pub mod assist;

/// Backend error types
pub mod error;

/// Token verification
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Re-export commonly used types
pub use server::{create_app, AppState, ServerConfig};
pub use error::BackendError;
pub use collab::store::SessionStore;
