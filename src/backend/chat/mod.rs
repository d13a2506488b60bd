//! Chat Backend Module
//!
//! The append-only chat log embedded in every session. Messages are stored
//! through the session store and fetched by polling; there is no push.
//!
//! # Architecture
//!
//! - **`handlers`** - List and send endpoints

/// HTTP handlers for session chat
pub mod handlers;

pub use handlers::{list_messages, send_message};
