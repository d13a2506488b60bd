//! Authentication Module
//!
//! Bearer-token verification. Signup, login and password reset belong to the
//! platform's authentication service; this server trusts any HS256 token
//! signed with the shared `JWT_SECRET` whose `sub` claim is a user UUID.
//!
//! The `middleware::auth` layer calls into this module on every session
//! route and attaches the caller's identity to the request.

/// JWT token creation and validation
pub mod tokens;

pub use tokens::{Claims, JwtKeys};
