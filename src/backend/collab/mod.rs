//! Collaboration Session Module
//!
//! Server-side functionality for collaboration sessions: a shared document,
//! a participant roster and the owner who controls both.
//!
//! # Architecture
//!
//! - **`store`** - The `SessionStore` trait and its error type
//! - **`db`** - PostgreSQL backend
//! - **`memory`** - In-memory backend (no `DATABASE_URL`, tests)
//! - **`access`** - Role checks shared by every handler
//! - **`handlers`** - Session CRUD and roster endpoints
//!
//! # Example
//!
//! ```rust,no_run
//! use studycollab::backend::collab::memory::MemorySessionStore;
//! use studycollab::backend::collab::store::{NewSession, SessionStore};
//! use uuid::Uuid;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MemorySessionStore::new();
//! let session = store
//!     .create_session(NewSession {
//!         title: "Chemistry".into(),
//!         content: String::new(),
//!         owner_id: Uuid::new_v4(),
//!     })
//!     .await?;
//! assert_eq!(session.version, 1);
//! # Ok(())
//! # }
//! ```

/// Persistence seam
pub mod store;

/// PostgreSQL session store
pub mod db;

/// In-memory session store
pub mod memory;

/// Role checks
pub mod access;

/// HTTP handlers for sessions
pub mod handlers;

pub use db::PgSessionStore;
pub use memory::MemorySessionStore;
pub use store::{SessionStore, StoreError};
