//! Client Module
//!
//! Rust client for the session API. There is no push channel, so clients
//! learn about other members' messages by polling.
//!
//! - **`api`** - `CollabClient`, one typed call per endpoint
//! - **`poller`** - `MessagePoller`, interval-driven delivery of new messages

pub mod api;

pub mod poller;

pub use api::{ClientError, CollabClient};
pub use poller::{MessagePoller, DEFAULT_POLL_INTERVAL};
