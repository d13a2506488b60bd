//! Chat Handlers
//!
//! HTTP handlers for the per-session chat log.
//!
//! - **`messages`** - List (polling) and send

pub mod messages;

pub use messages::{list_messages, send_message};
