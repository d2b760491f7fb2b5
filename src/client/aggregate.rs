//! Aggregate API client.
//!
//! [`LoyaltyApi`] bundles every resource client behind one shared
//! [`RequestExecutor`]: one connection pool, one base URL, one default
//! middleware stack. Construct it once at startup and share it.

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::error::{ApiError, ConfigError};
use crate::method::RestMethod;
use crate::middleware::{BearerAuth, Middleware, MiddlewareStack, MiddlewareStackBuilder};
use crate::models::HealthStatus;
use crate::request::RequestConfig;
use crate::resources::{
    AccountsClient, BranchesClient, CampaignsClient, CouponsClient, LicensesClient,
    NotificationsClient,
};
use crate::response::ClientResponse;
use crate::schema::JsonOf;

use super::{RequestExecutor, RequestExecutorBuilder};

/// Environment variable naming the backend base URL.
pub const ENV_BASE_URL: &str = "LOYALTY_API_BASE_URL";
/// Environment variable holding a bearer token, optional.
pub const ENV_TOKEN: &str = "LOYALTY_API_TOKEN";

/// Builder for the aggregate [`LoyaltyApi`] client.
#[derive(Debug)]
pub struct LoyaltyApiBuilder {
    executor: RequestExecutorBuilder,
    middleware: MiddlewareStackBuilder,
}

impl LoyaltyApiBuilder {
    fn new(base_url: Url) -> Self {
        Self {
            executor: RequestExecutor::builder(base_url),
            middleware: MiddlewareStack::builder(),
        }
    }

    /// Sets the default request timeout for every resource client.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.executor = self.executor.timeout(timeout);
        self
    }

    /// Adds a default header sent on every request.
    ///
    /// ## Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, ApiError> {
        self.executor = self.executor.default_header(name, value)?;
        Ok(self)
    }

    /// Authenticates every request with a fixed bearer token.
    pub fn bearer_token(self, token: impl Into<String>) -> Self {
        self.with_middleware(BearerAuth::fixed(token))
    }

    /// Appends a stage to the shared default middleware stack.
    pub fn with_middleware(mut self, stage: impl Middleware) -> Self {
        self.middleware = self.middleware.with(stage);
        self
    }

    /// Builds the aggregate client.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<LoyaltyApi, ApiError> {
        let executor = Arc::new(
            self.executor
                .middleware(self.middleware.build())
                .build()?,
        );
        Ok(LoyaltyApi {
            accounts: AccountsClient::new(Arc::clone(&executor)),
            branches: BranchesClient::new(Arc::clone(&executor)),
            campaigns: CampaignsClient::new(Arc::clone(&executor)),
            coupons: CouponsClient::new(Arc::clone(&executor)),
            licenses: LicensesClient::new(Arc::clone(&executor)),
            notifications: NotificationsClient::new(Arc::clone(&executor)),
            executor,
        })
    }
}

/// Aggregate client over every backend resource.
///
/// ## Examples
///
/// ```rust,ignore
/// use loyalty_api::LoyaltyApi;
/// use url::Url;
///
/// let api = LoyaltyApi::builder(Url::parse("https://api.example.com")?)
///     .bearer_token("s3cr3t")
///     .build()?;
///
/// let page = api.accounts.list(&Default::default()).await?.data;
/// println!("{} accounts", page.count);
/// ```
#[derive(Debug)]
pub struct LoyaltyApi {
    /// Accounts resource.
    pub accounts: AccountsClient,
    /// Branches resource.
    pub branches: BranchesClient,
    /// Campaigns resource.
    pub campaigns: CampaignsClient,
    /// Coupons resource.
    pub coupons: CouponsClient,
    /// Licenses resource.
    pub licenses: LicensesClient,
    /// Notifications resource.
    pub notifications: NotificationsClient,
    executor: Arc<RequestExecutor>,
}

impl LoyaltyApi {
    /// Creates a builder targeting the given base URL.
    pub fn builder(base_url: Url) -> LoyaltyApiBuilder {
        LoyaltyApiBuilder::new(base_url)
    }

    /// Creates a client with default settings.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: Url) -> Result<Self, ApiError> {
        Self::builder(base_url).build()
    }

    /// Creates a client from `LOYALTY_API_BASE_URL` and, when set,
    /// `LOYALTY_API_TOKEN`.
    ///
    /// ## Errors
    ///
    /// Returns an error if the base URL variable is missing or unparsable.
    pub fn from_env() -> Result<Self, ApiError> {
        let raw = std::env::var(ENV_BASE_URL)
            .map_err(|_| ConfigError::MissingField { field: ENV_BASE_URL })?;
        let base_url = Url::parse(&raw).map_err(ConfigError::InvalidUrl)?;

        let mut builder = Self::builder(base_url);
        if let Ok(token) = std::env::var(ENV_TOKEN) {
            builder = builder.bearer_token(token);
        }
        builder.build()
    }

    /// Returns the shared executor, for ad-hoc requests outside the
    /// resource clients.
    pub fn executor(&self) -> &Arc<RequestExecutor> {
        &self.executor
    }

    /// Probes the backend health endpoint.
    pub async fn health_check(&self) -> Result<ClientResponse<HealthStatus>, ApiError> {
        self.executor
            .execute(
                RestMethod::Get,
                "/health/",
                RequestConfig::new(),
                &JsonOf::<HealthStatus>::new(),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_health_check() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "ok",
                "version": "1.4.2"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = LoyaltyApi::new(Url::parse(&mock_server.uri()).unwrap()).unwrap();
        let health = api.health_check().await.unwrap().data;
        assert!(health.is_ok());
        assert_eq!(health.version.as_deref(), Some("1.4.2"));
    }

    #[tokio::test]
    async fn test_bearer_token_reaches_every_resource() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/notifications/n_1/"))
            .and(header("authorization", "Bearer s3cr3t"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "n_1",
                "title": "Welcome",
                "body": "Thanks for joining",
                "read": false,
                "created_at": "2026-02-01T09:00:00Z"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = LoyaltyApi::builder(Url::parse(&mock_server.uri()).unwrap())
            .bearer_token("s3cr3t")
            .build()
            .unwrap();
        let notification = api.notifications.read("n_1").await.unwrap().data;
        assert!(!notification.read);
    }

    #[test]
    fn test_from_env_requires_base_url() {
        std::env::remove_var(ENV_BASE_URL);
        let err = LoyaltyApi::from_env().unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }
}
