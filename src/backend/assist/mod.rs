//! AI Assist Module
//!
//! Per-user, per-session, per-day quota on AI-assisted edits.
//!
//! - **`quota`** - Counter keys and usage reads
//! - **`provider`** - Upstream text generation (OpenAI-compatible)
//! - **`gate`** - Check, call, charge and append
//! - **`handlers`** - HTTP endpoints

pub mod quota;

pub mod provider;

pub mod gate;

pub mod handlers;

pub use gate::run_assist;
pub use provider::{AssistError, AssistProvider, DisabledProvider, OpenAiCompatProvider};
pub use quota::UsageKey;
