//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Architecture
//!
//! - **`router`** - Main router creation, tracing, fallback
//! - **`api_routes`** - Authenticated session, chat and assist endpoints
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! └── api_routes.rs   - Session API routes
//! ```
//!
//! Only `/health` is public. Everything under `/api` requires a bearer token.

/// Main router creation
pub mod router;

/// Session API routes
pub mod api_routes;

pub use router::create_router;
