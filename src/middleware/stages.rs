//! Shipped middleware stages.

use std::sync::Arc;

use reqwest::header::{HeaderName, HeaderValue, AUTHORIZATION};

use super::{BoxFuture, Middleware};
use crate::error::{ApiError, ConfigError};
use crate::request::RequestConfig;

/// Header carrying the resource context a request originated from.
pub const CONTEXT_HEADER: &str = "x-api-context";

/// Tags every request with an `X-API-Context` header naming the resource
/// client it came from.
///
/// Each resource client appends one of these to the shared default stack,
/// so backend logs can attribute traffic per resource.
#[derive(Debug, Clone)]
pub struct ContextTag {
    context: &'static str,
}

impl ContextTag {
    /// Creates a tag for the given resource context.
    pub fn new(context: &'static str) -> Self {
        Self { context }
    }
}

impl Middleware for ContextTag {
    fn name(&self) -> &'static str {
        "context-tag"
    }

    fn on_request<'a>(
        &'a self,
        mut config: RequestConfig,
    ) -> BoxFuture<'a, Result<RequestConfig, ApiError>> {
        Box::pin(async move {
            config.headers_mut().insert(
                HeaderName::from_static(CONTEXT_HEADER),
                HeaderValue::from_static(self.context),
            );
            Ok(config)
        })
    }
}

/// Provides the current session token, or `None` when signed out.
///
/// A closure keeps token storage external: the mobile shell persists the
/// session and this layer only reads it at request time.
pub type TokenProvider = Arc<dyn Fn() -> Option<String> + Send + Sync>;

/// Injects `Authorization: Bearer <token>` into every request.
///
/// When the provider returns `None` the request goes out unauthenticated;
/// the backend answers 401 and the error surfaces as a status error.
#[derive(Clone)]
pub struct BearerAuth {
    provider: TokenProvider,
}

impl std::fmt::Debug for BearerAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerAuth").finish_non_exhaustive()
    }
}

impl BearerAuth {
    /// Auth with a fixed token.
    pub fn fixed(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            provider: Arc::new(move || Some(token.clone())),
        }
    }

    /// Auth with a token read at request time.
    pub fn with_provider(provider: TokenProvider) -> Self {
        Self { provider }
    }
}

impl Middleware for BearerAuth {
    fn name(&self) -> &'static str {
        "bearer-auth"
    }

    fn on_request<'a>(
        &'a self,
        mut config: RequestConfig,
    ) -> BoxFuture<'a, Result<RequestConfig, ApiError>> {
        Box::pin(async move {
            if let Some(token) = (self.provider)() {
                let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
                    ConfigError::invalid_header(format!("invalid bearer token: {e}"))
                })?;
                config.headers_mut().insert(AUTHORIZATION, value);
            }
            Ok(config)
        })
    }
}

/// Injects a fixed header into every request.
#[derive(Debug, Clone)]
pub struct HeaderInject {
    name: HeaderName,
    value: HeaderValue,
}

impl HeaderInject {
    /// Creates the stage.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidHeader`] if the name or value is not
    /// a legal HTTP header.
    pub fn new(name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self, ConfigError> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| ConfigError::invalid_header(format!("invalid header name: {e}")))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| ConfigError::invalid_header(format!("invalid header value: {e}")))?;
        Ok(Self { name, value })
    }
}

impl Middleware for HeaderInject {
    fn name(&self) -> &'static str {
        "header-inject"
    }

    fn on_request<'a>(
        &'a self,
        mut config: RequestConfig,
    ) -> BoxFuture<'a, Result<RequestConfig, ApiError>> {
        Box::pin(async move {
            config
                .headers_mut()
                .insert(self.name.clone(), self.value.clone());
            Ok(config)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_context_tag() {
        let stage = ContextTag::new("accounts");
        let config = stage.on_request(RequestConfig::new()).await.unwrap();
        assert_eq!(config.headers().get(CONTEXT_HEADER).unwrap(), "accounts");
    }

    #[tokio::test]
    async fn test_bearer_auth_fixed() {
        let stage = BearerAuth::fixed("session-token");
        let config = stage.on_request(RequestConfig::new()).await.unwrap();
        assert_eq!(
            config.headers().get(AUTHORIZATION).unwrap(),
            "Bearer session-token"
        );
    }

    #[tokio::test]
    async fn test_bearer_auth_signed_out() {
        let stage = BearerAuth::with_provider(Arc::new(|| None));
        let config = stage.on_request(RequestConfig::new()).await.unwrap();
        assert!(config.headers().get(AUTHORIZATION).is_none());
    }

    #[tokio::test]
    async fn test_bearer_auth_idempotent_on_retry() {
        // Re-running the stage on the same config must not duplicate
        // or corrupt the header.
        let stage = BearerAuth::fixed("tok");
        let config = stage.on_request(RequestConfig::new()).await.unwrap();
        let config = stage.on_request(config).await.unwrap();
        assert_eq!(config.headers().get_all(AUTHORIZATION).iter().count(), 1);
    }

    #[tokio::test]
    async fn test_header_inject() {
        let stage = HeaderInject::new("x-app-version", "3.2.1").unwrap();
        let config = stage.on_request(RequestConfig::new()).await.unwrap();
        assert_eq!(config.headers().get("x-app-version").unwrap(), "3.2.1");
    }

    #[test]
    fn test_header_inject_rejects_bad_name() {
        assert!(HeaderInject::new("bad name", "v").is_err());
    }
}
