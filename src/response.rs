//! Response types.
//!
//! [`RawResponse`] is what response middleware sees, before validation.
//! [`ClientResponse`] wraps the schema-validated body returned to callers.

use bytes::Bytes;
use reqwest::header::HeaderMap;

use crate::error::ValidationError;

/// An HTTP response before schema validation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// The HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HeaderMap,
    /// The raw body bytes.
    pub body: Bytes,
}

impl RawResponse {
    /// Parses the body as JSON; an empty body becomes `null`.
    pub fn json(&self) -> Result<serde_json::Value, ValidationError> {
        if self.body.is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_slice(&self.body).map_err(ValidationError::JsonParse)
    }
}

/// A schema-validated response.
#[derive(Debug, Clone)]
pub struct ClientResponse<T> {
    /// The validated, typed body.
    pub data: T,
    /// The HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HeaderMap,
}

impl<T> ClientResponse<T> {
    /// Discards the envelope, keeping only the typed body.
    pub fn into_data(self) -> T {
        self.data
    }
}
