//! Backend Error Module
//!
//! Error types returned by HTTP handlers and converted to JSON responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - BackendError and its status mapping
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! Storage, provider and validation errors all convert into `BackendError`
//! with `?`, so handlers never build status codes by hand for those cases.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
pub use conversion::ErrorBody;
