//! Transport-level failures: network, timeout, cancellation.

use thiserror::Error;

/// A connectivity failure before a response arrived.
///
/// The request may or may not have reached the server; callers treating
/// these as retryable should prefer idempotent operations.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Failed to establish a connection to the server.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The request failed in transit (protocol error, reset, bad TLS).
    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The response body could not be read.
    #[error("Failed to read response body: {0}")]
    BodyRead(#[source] reqwest::Error),
}

/// The configured deadline elapsed before a response arrived.
///
/// The in-flight request is aborted when this is raised; no late
/// completion can mutate state already returned to the caller.
#[derive(Debug, Error)]
#[error("Request timeout after {duration_ms}ms")]
pub struct TimeoutError {
    /// The timeout duration in milliseconds.
    pub duration_ms: u64,
}

/// The caller aborted the request via its cancellation token.
#[derive(Debug, Error)]
#[error("Request cancelled")]
pub struct CancellationError;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display() {
        let err = TimeoutError { duration_ms: 10 };
        assert_eq!(err.to_string(), "Request timeout after 10ms");
    }

    #[test]
    fn test_connection_display() {
        let err = NetworkError::Connection("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_cancellation_display() {
        assert_eq!(CancellationError.to_string(), "Request cancelled");
    }
}
