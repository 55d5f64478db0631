//! Layered error types for the open-API client.
//!
//! - [`ApiError`] - Top-level error returned by every dispatch
//! - [`ClientError`] - Transport failures (network, timeout, unreadable status)
//! - [`ValidationError`] - Malformed response envelopes or bodies
//! - [`AuthError`] - Missing or unusable access tokens
//! - [`ConfigError`] - Descriptor, request and client configuration mistakes
//! - [`DomainError`] - Non-zero `code` in a well-formed envelope

mod api_error;
mod auth_error;
mod client_error;
mod config_error;
mod domain_error;
mod validation_error;

pub use api_error::ApiError;
pub use auth_error::AuthError;
pub use client_error::ClientError;
pub use config_error::ConfigError;
pub use domain_error::DomainError;
pub use validation_error::ValidationError;
