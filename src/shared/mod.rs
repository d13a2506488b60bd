//! Shared Module
//!
//! Types shared between the server and the polling client. Everything here is
//! plain data plus validation and is serialized as JSON over the session API.

/// Session records, roles and request bodies
pub mod session;

/// Chat message data structure
pub mod message;

/// AI-assist quota and outcome types
pub mod assist;

/// Field bounds and validation
pub mod limits;

/// Shared error types
pub mod error;

/// Re-export commonly used types for convenience
pub use session::{
    CreateSessionRequest, ListSessionsResponse, Role, Session, SessionSummary, SessionView,
    UpdateSessionRequest,
};
pub use message::{ChatMessage, ListMessagesParams, ListMessagesResponse, MessageKind, SendMessageRequest};
pub use assist::{AssistOutcome, AssistRequest, AssistUsage, SendMessageResponse};
pub use limits::Limits;
pub use error::SharedError;
