//! Typed request execution with tracing instrumentation.
//!
//! [`RequestExecutor`] is the single generic function every resource client
//! method funnels through: it substitutes path placeholders, attaches query
//! parameters and the JSON body, runs the middleware chain, issues the
//! network call, and validates the response against the operation's schema.
//!
//! The executor has no side effects beyond the network call itself and
//! never retries; a caller may re-run it with a cloned configuration.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::{instrument, Span};
use url::Url;

use crate::error::{
    ApiError, CancellationError, ConfigError, NetworkError, StatusError, TimeoutError,
};
use crate::method::RestMethod;
use crate::middleware::MiddlewareStack;
use crate::request::RequestConfig;
use crate::response::{ClientResponse, RawResponse};
use crate::schema::Validator;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Builder for configuring a [`RequestExecutor`].
#[derive(Debug)]
pub struct RequestExecutorBuilder {
    base_url: Url,
    timeout: Duration,
    default_headers: HeaderMap,
    middleware: MiddlewareStack,
}

impl RequestExecutorBuilder {
    fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_headers: HeaderMap::new(),
            middleware: MiddlewareStack::default(),
        }
    }

    /// Sets the default request timeout.
    ///
    /// Individual calls may override this via their configuration.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adds a default header to all requests.
    ///
    /// ## Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, ApiError> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| ConfigError::invalid_header(format!("invalid header name: {e}")))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| ConfigError::invalid_header(format!("invalid header value: {e}")))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Sets the default middleware stack.
    ///
    /// These stages run before any per-call stages on every request.
    pub fn middleware(mut self, stack: MiddlewareStack) -> Self {
        self.middleware = stack;
        self
    }

    /// Builds the [`RequestExecutor`].
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<RequestExecutor, ApiError> {
        let http = reqwest::Client::builder()
            .default_headers(self.default_headers)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(NetworkError::Request)?;

        Ok(RequestExecutor {
            http,
            base_url: self.base_url,
            timeout: self.timeout,
            middleware: self.middleware,
        })
    }
}

/// Async executor for typed REST requests.
///
/// Wraps `reqwest::Client` with connection pooling. Stateless aside from
/// its immutable configuration, so one instance is safely shared by every
/// resource client.
///
/// ## Examples
///
/// ```rust,ignore
/// use loyalty_api::{RequestExecutor, RequestConfig, RestMethod};
/// use loyalty_api::schema::JsonOf;
/// use url::Url;
///
/// #[derive(serde::Deserialize)]
/// struct Account { id: String, balance: f64 }
///
/// let base_url = Url::parse("https://api.example.com")?;
/// let executor = RequestExecutor::new(base_url)?;
///
/// let config = RequestConfig::new().path_param("id", "42");
/// let response = executor
///     .execute(RestMethod::Get, "/accounts/{id}/", config, &JsonOf::<Account>::new())
///     .await?;
/// println!("balance: {}", response.data.balance);
/// ```
#[derive(Debug)]
pub struct RequestExecutor {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
    middleware: MiddlewareStack,
}

impl RequestExecutor {
    /// Creates a new builder for configuring an executor.
    pub fn builder(base_url: Url) -> RequestExecutorBuilder {
        RequestExecutorBuilder::new(base_url)
    }

    /// Creates an executor with default settings.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: Url) -> Result<Self, ApiError> {
        Self::builder(base_url).build()
    }

    /// Returns the base URL for this executor.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the default middleware stack.
    pub fn default_middleware(&self) -> &MiddlewareStack {
        &self.middleware
    }

    /// Executes a request and validates the response.
    ///
    /// The effective middleware chain is the executor's default stack
    /// followed by the stages in `config`, in that order.
    ///
    /// ## Errors
    ///
    /// - [`ConfigError`] for an unresolved path placeholder or a body on a
    ///   bodiless method, raised before any network I/O
    /// - [`NetworkError`] / [`TimeoutError`] / [`CancellationError`] for
    ///   transport failures
    /// - [`StatusError`] when the server answers non-2xx
    /// - [`crate::ValidationError`] when a 2xx body violates the schema
    #[instrument(
        name = "api_request",
        skip(self, config, schema),
        fields(
            http.method = %method,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub async fn execute<V>(
        &self,
        method: RestMethod,
        path_template: &str,
        config: RequestConfig,
        schema: &V,
    ) -> Result<ClientResponse<V::Output>, ApiError>
    where
        V: Validator,
    {
        // Fail-fast configuration checks, before middleware and I/O
        let path = substitute_path(path_template, &config)?;
        if config.body.is_some() && !method.has_body() {
            return Err(ConfigError::UnexpectedBody {
                method: method_name(method),
            }
            .into());
        }

        let chain = self.middleware.concat(&config.middleware);
        let config = chain.apply_request(config).await?;

        let full_url = self
            .base_url
            .join(&path)
            .map_err(ConfigError::InvalidUrl)?;
        Span::current().record("http.url", full_url.as_str());

        let timeout = config.timeout.unwrap_or(self.timeout);
        let mut request = self
            .http
            .request(method.to_reqwest(), full_url)
            .timeout(timeout)
            .headers(config.headers.clone());

        let query_pairs: Vec<(String, String)> = config
            .query
            .iter()
            .flat_map(|(key, value)| value.pairs(key))
            .collect();
        if !query_pairs.is_empty() {
            request = request.query(&query_pairs);
        }
        if let Some(body) = &config.body {
            request = request.json(body);
        }

        let send = request.send();
        let result = match &config.cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => return Err(CancellationError.into()),
                    result = send => result,
                }
            }
            None => send.await,
        };
        let response = result.map_err(|e| transport_error(e, timeout))?;

        let status = response.status().as_u16();
        Span::current().record("http.status_code", status);

        if !response.status().is_success() {
            Span::current().record(
                "otel.status_code",
                if status >= 500 { "ERROR" } else { "UNSET" },
            );
            let text = response.text().await.map_err(NetworkError::BodyRead)?;
            return Err(StatusError::from_body(status, text).into());
        }

        Span::current().record("otel.status_code", "OK");

        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(NetworkError::BodyRead)?;

        let raw = chain
            .apply_response(RawResponse {
                status,
                headers,
                body,
            })
            .await?;

        let data = schema.validate(raw.json()?)?;
        Ok(ClientResponse {
            data,
            status: raw.status,
            headers: raw.headers,
        })
    }
}

/// Resolves every `{name}` placeholder in `template` from the config's
/// path parameters, URL-encoding each value.
///
/// An unresolved placeholder is a fatal configuration error, caught here
/// before any network I/O.
fn substitute_path(template: &str, config: &RequestConfig) -> Result<String, ConfigError> {
    let mut path = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        path.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            // Unclosed brace: not a placeholder, keep it literal
            path.push('{');
            path.push_str(after);
            return Ok(path);
        };
        let name = &after[..close];
        let value = config
            .path_params
            .get(name)
            .ok_or_else(|| ConfigError::missing_path_param(name, template))?;
        path.push_str(&urlencoding::encode(value));
        rest = &after[close + 1..];
    }
    path.push_str(rest);
    Ok(path)
}

fn method_name(method: RestMethod) -> &'static str {
    match method {
        RestMethod::Get => "GET",
        RestMethod::Post => "POST",
        RestMethod::Put => "PUT",
        RestMethod::Patch => "PATCH",
        RestMethod::Delete => "DELETE",
    }
}

/// Maps a reqwest failure onto the transport error taxonomy.
fn transport_error(err: reqwest::Error, timeout: Duration) -> ApiError {
    if err.is_timeout() {
        TimeoutError {
            duration_ms: timeout.as_millis() as u64,
        }
        .into()
    } else if err.is_connect() {
        NetworkError::Connection(err.to_string()).into()
    } else {
        NetworkError::Request(err).into()
    }
}
