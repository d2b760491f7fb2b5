//! Per-call request configuration.
//!
//! A [`RequestConfig`] is constructed fresh for every call and never
//! persisted. It is `Clone` so a caller can retry with an identical
//! configuration; the executor itself never retries.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tokio_util::sync::CancellationToken;

use crate::error::ConfigError;
use crate::middleware::MiddlewareStack;

/// A query parameter value: a scalar or a list.
///
/// Lists are serialized by repeating the key (`?tag=a&tag=b`).
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    /// A string scalar.
    Str(String),
    /// An integer scalar.
    Int(i64),
    /// A boolean scalar.
    Bool(bool),
    /// A list of string values, serialized as repeated keys.
    List(Vec<String>),
}

impl QueryValue {
    /// Expands this value into `key=value` pairs.
    pub(crate) fn pairs(&self, key: &str) -> Vec<(String, String)> {
        match self {
            Self::Str(s) => vec![(key.to_string(), s.clone())],
            Self::Int(i) => vec![(key.to_string(), i.to_string())],
            Self::Bool(b) => vec![(key.to_string(), b.to_string())],
            Self::List(items) => items
                .iter()
                .map(|item| (key.to_string(), item.clone()))
                .collect(),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// Configuration for a single request.
///
/// Built by resource client methods, transformed by request middleware,
/// and consumed by the executor.
///
/// ## Examples
///
/// ```rust,ignore
/// let config = RequestConfig::new()
///     .path_param("id", "42")
///     .query("page", 2u32)
///     .timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    pub(crate) path_params: BTreeMap<String, String>,
    pub(crate) query: Vec<(String, QueryValue)>,
    pub(crate) body: Option<serde_json::Value>,
    pub(crate) headers: HeaderMap,
    pub(crate) timeout: Option<Duration>,
    pub(crate) cancel: Option<CancellationToken>,
    pub(crate) middleware: MiddlewareStack,
}

impl RequestConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Supplies a value for a `{name}` placeholder in the path template.
    pub fn path_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.path_params.insert(name.into(), value.to_string());
        self
    }

    /// Appends a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Appends a query parameter only when the value is present.
    ///
    /// `None` values are omitted from the URL entirely.
    pub fn query_opt(self, key: impl Into<String>, value: Option<impl Into<QueryValue>>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    /// Sets the JSON request body.
    pub fn body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Inserts a request header.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidHeader`] if the name or value is not
    /// a legal HTTP header.
    pub fn header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, ConfigError> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| ConfigError::invalid_header(format!("invalid header name: {e}")))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| ConfigError::invalid_header(format!("invalid header value: {e}")))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Sets a per-call timeout, overriding the executor default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Attaches a cancellation token; triggering it aborts the in-flight
    /// request and rejects with a cancellation error.
    pub fn cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Sets the middleware stack to run around this request.
    pub fn middleware(mut self, stack: MiddlewareStack) -> Self {
        self.middleware = stack;
        self
    }

    /// Read access to the headers accumulated so far.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Mutable access to headers, for middleware stages.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// The JSON body, if one is set.
    pub fn body_ref(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }
}
