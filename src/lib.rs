//! studycollab - Main Library
//!
//! Collaboration sessions for an educational platform: a shared markdown
//! document, an append-only chat log, a participant roster and a daily
//! AI-assist quota, served over a stateless HTTP JSON API.
//!
//! # Module Structure
//!
//! - **`shared`** - Wire and data types used by both server and client
//!   - Sessions, roles, messages, assist usage
//!   - Field limits and validation
//!   - Error types
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server with bearer-token auth
//!   - Session store (PostgreSQL or in-memory)
//!   - AI assist gate and quota
//!
//! - **`client`** - Rust client for the session API
//!   - Typed calls for every endpoint
//!   - Polling loop that delivers new chat messages
//!
//! # Feature Flags
//!
//! - **`ssr`** - Enables the backend modules and the server binary (default)
//!
//! # Usage
//!
//! ## Server-Side
//!
//! ```rust,no_run
//! use studycollab::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::load()?;
//! let app = create_app(&config).await;
//! // Use app with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! ## Client-Side
//!
//! ```rust,no_run
//! use studycollab::client::CollabClient;
//!
//! # async fn example() -> Result<(), studycollab::client::ClientError> {
//! let client = CollabClient::new("http://127.0.0.1:3000", "<jwt>");
//! let sessions = client.list_sessions().await?;
//! # Ok(())
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;

/// HTTP client and message poller
pub mod client;
