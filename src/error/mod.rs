//! Layered error types for the client layer.
//!
//! The error hierarchy is structured for actionable diagnostics:
//! - [`ApiError`] - Top-level error type for all client operations
//! - [`ConfigError`] - Caller bugs caught before any network I/O
//! - [`ValidationError`] - Outbound schema failures and response-shape mismatches
//! - [`StatusError`] - Non-2xx responses with status and parsed body
//! - [`NetworkError`] / [`TimeoutError`] / [`CancellationError`] - Transport failures

mod api_error;
mod config_error;
mod status_error;
mod transport_error;
mod validation_error;

pub use api_error::ApiError;
pub use config_error::ConfigError;
pub use status_error::StatusError;
pub use transport_error::{CancellationError, NetworkError, TimeoutError};
pub use validation_error::ValidationError;
