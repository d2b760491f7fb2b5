//! Schema validation errors.

use thiserror::Error;

/// Errors from schema validation.
///
/// These occur in two places: on outbound data before any network call is
/// made (fail fast, zero side effects), or on an inbound response body after
/// a successful call (the server answered but violated the shape contract).
/// Both cases are caller-visible as the same kind so consumers can treat
/// "the contract was broken" uniformly.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// JSON parsing or typed deserialization failed.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A declared constraint on a field was violated.
    #[error("Constraint violation on `{field}`: {message}")]
    Constraint {
        /// The offending field.
        field: &'static str,
        /// What the constraint expected.
        message: String,
    },

    /// A required field is missing from the raw value.
    #[error("Missing required field `{field}`")]
    MissingField {
        /// The missing field name.
        field: &'static str,
    },

    /// Empty response body when content was expected.
    #[error("Empty response body")]
    EmptyBody,

    /// Non-empty response body where none was expected.
    #[error("Unexpected response body for a no-content operation")]
    UnexpectedBody,
}

impl ValidationError {
    /// Creates a constraint violation error.
    pub fn constraint(field: &'static str, message: impl Into<String>) -> Self {
        Self::Constraint {
            field,
            message: message.into(),
        }
    }

    /// Returns `true` if this is a parsing error rather than a constraint
    /// failure.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::JsonParse(_))
    }
}
