//! Server-reported HTTP status errors.

use thiserror::Error;

/// A non-2xx response from the server.
///
/// The server answered, so this is distinct from transport failures and
/// from response-shape validation failures. Carries the status code and
/// the error body parsed as JSON when the server sent one.
#[derive(Debug, Error)]
#[error("HTTP {status}: {message}")]
pub struct StatusError {
    /// The HTTP status code returned.
    pub status: u16,
    /// Error message extracted from the response body.
    pub message: String,
    /// The error body parsed as JSON, when the server sent valid JSON.
    pub body: Option<serde_json::Value>,
}

impl StatusError {
    /// Builds a status error from a raw response body.
    ///
    /// The body is kept as parsed JSON when possible; the display message
    /// falls back to a `detail` field (the backend's error envelope) and
    /// then to the raw text.
    pub fn from_body(status: u16, text: String) -> Self {
        let body: Option<serde_json::Value> = serde_json::from_str(&text).ok();
        let message = body
            .as_ref()
            .and_then(|v| v.get("detail"))
            .and_then(|d| d.as_str())
            .map(str::to_string)
            .unwrap_or(text);
        Self {
            status,
            message,
            body,
        }
    }

    /// Returns `true` if this status is retryable.
    ///
    /// 5xx errors and 429 (rate limit) are retryable; other 4xx are not.
    pub fn is_retryable(&self) -> bool {
        self.status >= 500 || self.status == 429
    }

    /// Returns `true` for client-side (4xx) statuses.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_body() {
        let err = StatusError::from_body(404, r#"{"detail": "Not found."}"#.to_string());
        assert_eq!(err.status, 404);
        assert_eq!(err.message, "Not found.");
        assert!(err.body.is_some());
    }

    #[test]
    fn test_from_plain_body() {
        let err = StatusError::from_body(502, "Bad Gateway".to_string());
        assert_eq!(err.message, "Bad Gateway");
        assert!(err.body.is_none());
    }

    #[test]
    fn test_retryability() {
        assert!(StatusError::from_body(500, String::new()).is_retryable());
        assert!(StatusError::from_body(429, String::new()).is_retryable());
        assert!(!StatusError::from_body(404, String::new()).is_retryable());
        assert!(!StatusError::from_body(400, String::new()).is_retryable());
    }

    #[test]
    fn test_client_error() {
        assert!(StatusError::from_body(422, String::new()).is_client_error());
        assert!(!StatusError::from_body(500, String::new()).is_client_error());
    }
}
