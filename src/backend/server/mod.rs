//! Server Module
//!
//! Server-side code for initializing and configuring the Axum HTTP server.
//!
//! # Architecture
//!
//! - **`config`** - Layered configuration (defaults, TOML, environment)
//! - **`state`** - `AppState` and `FromRef` implementations
//! - **`init`** - State assembly and app creation
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── config.rs       - ServerConfig loading and validation
//! ├── state.rs        - AppState and FromRef implementations
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `ServerConfig::load()`
//! 2. **Store Selection**: PostgreSQL when `DATABASE_URL` connects, memory otherwise
//! 3. **Provider Selection**: OpenAI-compatible client when `ASSIST_API_KEY` is set
//! 4. **Router Creation**: Routes, auth middleware, tracing
//!
//! # Example
//!
//! ```rust,no_run
//! use studycollab::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::load()?;
//! let app = create_app(&config).await;
//! let listener = tokio::net::TcpListener::bind(config.socket_addr()?).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Server configuration loading
pub mod config;

/// Application state management
pub mod state;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use config::{ConfigError, ServerConfig};
pub use init::{build_state, create_app};
pub use state::{AppState, CollabSettings};
