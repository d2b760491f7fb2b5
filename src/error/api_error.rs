//! Top-level API error type.

use super::{CancellationError, ConfigError, NetworkError, StatusError, TimeoutError, ValidationError};
use thiserror::Error;

/// Top-level error type for all client operations.
///
/// Every failure surfaces as exactly one of these kinds, and consumers
/// (the hooks layer, UI glue) pattern-match on the kind to decide
/// retry/toast/rollback behavior. The core never swallows an error and
/// never retries on its own.
///
/// ## Examples
///
/// ```rust,ignore
/// use loyalty_api::ApiError;
///
/// fn handle_error(err: ApiError) {
///     match err {
///         ApiError::Status(e) if e.status == 404 => show_not_found(),
///         ApiError::Validation(e) => log_contract_violation(e),
///         e if e.is_retryable() => schedule_retry(),
///         e => show_toast(e),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// Caller bug caught before any network I/O.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Schema violation, outbound or on the response shape.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Server answered with a non-2xx status.
    #[error(transparent)]
    Status(#[from] StatusError),

    /// Transport failure before a response arrived.
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// Deadline exceeded; the in-flight request was aborted.
    #[error(transparent)]
    Timeout(#[from] TimeoutError),

    /// Caller aborted the request.
    #[error(transparent)]
    Cancelled(#[from] CancellationError),
}

impl ApiError {
    /// Returns `true` if a caller may reasonably retry this operation.
    ///
    /// Network and timeout failures are retryable, as are 5xx and 429
    /// statuses. Config, validation, 4xx, and cancellation are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout(_) => true,
            Self::Status(e) => e.is_retryable(),
            Self::Config(_) | Self::Validation(_) | Self::Cancelled(_) => false,
        }
    }

    /// Returns the HTTP status code if the server answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status(e) => Some(e.status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_error() {
        let err: ApiError = ConfigError::missing_path_param("id", "/accounts/{id}/").into();
        assert!(matches!(err, ApiError::Config(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_timeout_is_retryable() {
        let err: ApiError = TimeoutError { duration_ms: 5000 }.into();
        assert!(err.is_retryable());
    }

    #[test]
    fn test_500_is_retryable_404_is_not() {
        let server: ApiError = StatusError::from_body(500, String::new()).into();
        assert!(server.is_retryable());
        assert_eq!(server.status_code(), Some(500));

        let missing: ApiError = StatusError::from_body(404, String::new()).into();
        assert!(!missing.is_retryable());
    }

    #[test]
    fn test_validation_not_retryable() {
        let err: ApiError = ValidationError::constraint("amount", "must be positive").into();
        assert!(!err.is_retryable());
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn test_cancellation_not_retryable() {
        let err: ApiError = CancellationError.into();
        assert!(!err.is_retryable());
    }
}
