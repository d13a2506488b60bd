//! Middleware Module
//!
//! HTTP middleware applied before requests reach handlers.
//!
//! - **`auth`** - Bearer-token authentication for the session API

pub mod auth;

pub use auth::{AuthenticatedUser, AuthUser, auth_middleware};
