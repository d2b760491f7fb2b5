//! Request/response middleware chain.
//!
//! Middleware stages intercept the request configuration before the network
//! call and the raw response after it. Stages compose left-to-right:
//! executor defaults first, then stages appended at client construction
//! time, in registration order. Stage N's output is stage N+1's input, and
//! stages are awaited in sequence, never concurrently, because stages
//! commonly inject headers that later stages depend on.
//!
//! Stacks are immutable values built once: appending produces a new stack,
//! so concurrent requests never observe a list mid-mutation.

mod stages;

pub use stages::{BearerAuth, ContextTag, HeaderInject};

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::ApiError;
use crate::request::RequestConfig;
use crate::response::RawResponse;

/// A boxed future returned by middleware stages.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A composable request/response interceptor stage.
///
/// Both hooks default to pass-through. A stage that returns an error
/// aborts the chain; the error propagates to the caller untouched.
///
/// Stages must be idempotent with respect to retries: the same
/// configuration may be re-processed if the caller retries, so
/// `on_request` must not assume single invocation.
///
/// ## Examples
///
/// ```rust,ignore
/// struct Correlation;
///
/// impl Middleware for Correlation {
///     fn name(&self) -> &'static str {
///         "correlation"
///     }
///
///     fn on_request<'a>(
///         &'a self,
///         mut config: RequestConfig,
///     ) -> BoxFuture<'a, Result<RequestConfig, ApiError>> {
///         Box::pin(async move {
///             config.headers_mut().insert("x-correlation-id", new_id());
///             Ok(config)
///         })
///     }
/// }
/// ```
pub trait Middleware: Send + Sync + 'static {
    /// The unique name of this stage, for logging and debugging.
    fn name(&self) -> &'static str;

    /// Transforms the request configuration before the network call.
    fn on_request<'a>(
        &'a self,
        config: RequestConfig,
    ) -> BoxFuture<'a, Result<RequestConfig, ApiError>> {
        Box::pin(std::future::ready(Ok(config)))
    }

    /// Transforms the raw response before validation.
    fn on_response<'a>(
        &'a self,
        response: RawResponse,
    ) -> BoxFuture<'a, Result<RawResponse, ApiError>> {
        Box::pin(std::future::ready(Ok(response)))
    }
}

/// An immutable, ordered list of middleware stages.
///
/// Cheap to clone and safe to share: the underlying list is never mutated
/// after construction. Per-client stacks are built with [`extend`],
/// which appends stages after the defaults in a new value.
///
/// [`extend`]: MiddlewareStack::extend
#[derive(Clone)]
pub struct MiddlewareStack {
    stages: Arc<[Arc<dyn Middleware>]>,
}

impl Default for MiddlewareStack {
    fn default() -> Self {
        Self {
            stages: Arc::from(Vec::new()),
        }
    }
}

impl fmt::Debug for MiddlewareStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.stages.iter().map(|s| s.name()))
            .finish()
    }
}

impl MiddlewareStack {
    /// Creates a builder for a new stack.
    pub fn builder() -> MiddlewareStackBuilder {
        MiddlewareStackBuilder::default()
    }

    /// Returns a new stack with `extra` stages appended after this one's.
    ///
    /// Composition order is preserved: this stack's stages run first.
    pub fn extend(&self, extra: impl IntoIterator<Item = Arc<dyn Middleware>>) -> Self {
        let mut stages: Vec<Arc<dyn Middleware>> = self.stages.to_vec();
        stages.extend(extra);
        Self {
            stages: Arc::from(stages),
        }
    }

    /// Concatenates two stacks: `self`'s stages first, then `other`'s.
    pub fn concat(&self, other: &Self) -> Self {
        if other.is_empty() {
            return self.clone();
        }
        self.extend(other.stages.iter().cloned())
    }

    /// The number of stages in this stack.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns `true` if the stack has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage names in composition order.
    pub fn names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Runs every `on_request` hook in order.
    pub async fn apply_request(&self, mut config: RequestConfig) -> Result<RequestConfig, ApiError> {
        for stage in self.stages.iter() {
            config = stage.on_request(config).await?;
        }
        Ok(config)
    }

    /// Runs every `on_response` hook in order.
    pub async fn apply_response(&self, mut response: RawResponse) -> Result<RawResponse, ApiError> {
        for stage in self.stages.iter() {
            response = stage.on_response(response).await?;
        }
        Ok(response)
    }
}

/// Builder for [`MiddlewareStack`].
#[derive(Default)]
pub struct MiddlewareStackBuilder {
    stages: Vec<Arc<dyn Middleware>>,
}

impl fmt::Debug for MiddlewareStackBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.stages.iter().map(|s| s.name()))
            .finish()
    }
}

impl MiddlewareStackBuilder {
    /// Appends a stage.
    pub fn with(mut self, stage: impl Middleware) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    /// Appends an already-shared stage.
    pub fn with_arc(mut self, stage: Arc<dyn Middleware>) -> Self {
        self.stages.push(stage);
        self
    }

    /// Builds the immutable stack.
    pub fn build(self) -> MiddlewareStack {
        MiddlewareStack {
            stages: Arc::from(self.stages),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use reqwest::header::HeaderValue;

    /// Appends its tag to the `x-trace` header, so tests can observe
    /// composition order.
    struct Tag(&'static str);

    impl Middleware for Tag {
        fn name(&self) -> &'static str {
            self.0
        }

        fn on_request<'a>(
            &'a self,
            mut config: RequestConfig,
        ) -> BoxFuture<'a, Result<RequestConfig, ApiError>> {
            Box::pin(async move {
                let trace = config
                    .headers()
                    .get("x-trace")
                    .and_then(|v| v.to_str().ok())
                    .map(|v| format!("{v},{}", self.0))
                    .unwrap_or_else(|| self.0.to_string());
                config
                    .headers_mut()
                    .insert("x-trace", HeaderValue::from_str(&trace).unwrap());
                Ok(config)
            })
        }
    }

    struct Failing;

    impl Middleware for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn on_request<'a>(
            &'a self,
            _config: RequestConfig,
        ) -> BoxFuture<'a, Result<RequestConfig, ApiError>> {
            Box::pin(std::future::ready(Err(ValidationError::constraint(
                "token",
                "expired",
            )
            .into())))
        }
    }

    #[tokio::test]
    async fn test_request_stages_run_in_order() {
        let stack = MiddlewareStack::builder().with(Tag("a")).with(Tag("b")).build();
        let config = stack.apply_request(RequestConfig::new()).await.unwrap();
        assert_eq!(config.headers().get("x-trace").unwrap(), "a,b");
    }

    #[tokio::test]
    async fn test_extend_appends_after_defaults() {
        let defaults = MiddlewareStack::builder().with(Tag("global")).build();
        let client_stack = defaults.extend([Arc::new(Tag("client")) as Arc<dyn Middleware>]);
        assert_eq!(client_stack.names(), vec!["global", "client"]);

        let config = client_stack.apply_request(RequestConfig::new()).await.unwrap();
        assert_eq!(config.headers().get("x-trace").unwrap(), "global,client");

        // The original default stack is unchanged
        assert_eq!(defaults.names(), vec!["global"]);
    }

    #[tokio::test]
    async fn test_failing_stage_aborts_chain() {
        let stack = MiddlewareStack::builder()
            .with(Tag("a"))
            .with(Failing)
            .with(Tag("never"))
            .build();
        let err = stack.apply_request(RequestConfig::new()).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_empty_stack_is_pass_through() {
        let stack = MiddlewareStack::default();
        assert!(stack.is_empty());
        let config = RequestConfig::new().path_param("id", 1);
        let out = stack.apply_request(config.clone()).await.unwrap();
        assert_eq!(out.path_params, config.path_params);
    }
}
