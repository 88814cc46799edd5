//! Layered error types for the API crate.
//!
//! The error hierarchy is structured for actionable diagnostics:
//! - [`ApiError`] - Top-level error type for all API operations
//! - [`ClientError`] - HTTP client, network and status errors
//! - [`ValidationError`] - Payload parsing and required-field errors
//! - [`AuthError`] - Authentication and authorization errors
//! - [`ConfigError`] - Client configuration and unstable-operation errors

mod api_error;
mod auth_error;
mod client_error;
mod config_error;
mod validation_error;

pub use api_error::ApiError;
pub use auth_error::AuthError;
pub use client_error::ClientError;
pub use config_error::ConfigError;
pub use validation_error::ValidationError;
