//! Request configuration errors.

use thiserror::Error;

/// Errors in request configuration.
///
/// These errors indicate caller bugs and are always raised before any
/// network I/O takes place. They are never retryable.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A path template placeholder has no matching path parameter.
    #[error("Missing path parameter `{name}` for `{path}`")]
    MissingPathParam {
        /// The placeholder name with no supplied value.
        name: String,
        /// The path template being resolved.
        path: String,
    },

    /// A body was supplied for a method that must not carry one.
    #[error("{method} requests must not carry a body")]
    UnexpectedBody {
        /// The offending HTTP method.
        method: &'static str,
    },

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A header name or value could not be constructed.
    #[error("Invalid header: {message}")]
    InvalidHeader {
        /// Description of the invalid header.
        message: String,
    },

    /// A required configuration field is missing.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },
}

impl ConfigError {
    /// Creates a missing path parameter error.
    pub fn missing_path_param(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::MissingPathParam {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Creates an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }
}
