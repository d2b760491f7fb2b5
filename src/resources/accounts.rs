//! Accounts resource client.

use std::sync::Arc;

use crate::client::RequestExecutor;
use crate::error::{ApiError, ValidationError};
use crate::method::RestMethod;
use crate::middleware::{ContextTag, MiddlewareStack};
use crate::models::{
    Account, AccountCreate, AccountListParams, AccountPatch, AccountUpdate, BalanceAdjustment, Page,
};
use crate::request::RequestConfig;
use crate::response::ClientResponse;
use crate::schema::{CheckedJson, JsonOf, NoContent, Validate};

/// Client for the accounts resource.
///
/// ## Examples
///
/// ```rust,ignore
/// let account = api.accounts.read("42").await?.data;
/// println!("{} has {} points", account.owner_name, account.points);
/// ```
#[derive(Debug)]
pub struct AccountsClient {
    exec: Arc<RequestExecutor>,
    middleware: MiddlewareStack,
}

impl AccountsClient {
    pub(crate) fn new(exec: Arc<RequestExecutor>) -> Self {
        let middleware = MiddlewareStack::builder()
            .with(ContextTag::new("accounts"))
            .build();
        Self { exec, middleware }
    }

    fn config(&self) -> RequestConfig {
        RequestConfig::new().middleware(self.middleware.clone())
    }

    /// Lists accounts, paginated.
    pub async fn list(
        &self,
        params: &AccountListParams,
    ) -> Result<ClientResponse<Page<Account>>, ApiError> {
        params.check()?;
        let config = self
            .config()
            .query_opt("page", params.page)
            .query_opt("page_size", params.page_size)
            .query_opt("search", params.search.clone())
            .query_opt("tier", params.tier_name());
        self.exec
            .execute(
                RestMethod::Get,
                "/accounts/",
                config,
                &JsonOf::<Page<Account>>::new(),
            )
            .await
    }

    /// Creates an account.
    pub async fn create(&self, body: &AccountCreate) -> Result<ClientResponse<Account>, ApiError> {
        body.check()?;
        let config = self
            .config()
            .body(serde_json::to_value(body).map_err(ValidationError::JsonParse)?);
        self.exec
            .execute(
                RestMethod::Post,
                "/accounts/",
                config,
                &CheckedJson::<Account>::new(),
            )
            .await
    }

    /// Reads a single account.
    pub async fn read(&self, id: &str) -> Result<ClientResponse<Account>, ApiError> {
        let config = self.config().path_param("id", id);
        self.exec
            .execute(
                RestMethod::Get,
                "/accounts/{id}/",
                config,
                &CheckedJson::<Account>::new(),
            )
            .await
    }

    /// Replaces an account.
    pub async fn update(
        &self,
        id: &str,
        body: &AccountUpdate,
    ) -> Result<ClientResponse<Account>, ApiError> {
        body.check()?;
        let config = self
            .config()
            .path_param("id", id)
            .body(serde_json::to_value(body).map_err(ValidationError::JsonParse)?);
        self.exec
            .execute(
                RestMethod::Put,
                "/accounts/{id}/",
                config,
                &CheckedJson::<Account>::new(),
            )
            .await
    }

    /// Partially updates an account.
    pub async fn partial_update(
        &self,
        id: &str,
        body: &AccountPatch,
    ) -> Result<ClientResponse<Account>, ApiError> {
        body.check()?;
        let config = self
            .config()
            .path_param("id", id)
            .body(serde_json::to_value(body).map_err(ValidationError::JsonParse)?);
        self.exec
            .execute(
                RestMethod::Patch,
                "/accounts/{id}/",
                config,
                &CheckedJson::<Account>::new(),
            )
            .await
    }

    /// Deletes an account.
    pub async fn delete(&self, id: &str) -> Result<ClientResponse<()>, ApiError> {
        let config = self.config().path_param("id", id);
        self.exec
            .execute(RestMethod::Delete, "/accounts/{id}/", config, &NoContent)
            .await
    }

    /// Adjusts the stored-value balance of an account.
    ///
    /// The body is validated before any network call; a non-finite amount
    /// rejects with a validation error and issues zero requests.
    pub async fn update_balance(
        &self,
        id: &str,
        body: &BalanceAdjustment,
    ) -> Result<ClientResponse<Account>, ApiError> {
        body.check()?;
        let config = self
            .config()
            .path_param("id", id)
            .body(serde_json::to_value(body).map_err(ValidationError::JsonParse)?);
        self.exec
            .execute(
                RestMethod::Post,
                "/accounts/{id}/update-balance/",
                config,
                &CheckedJson::<Account>::new(),
            )
            .await
    }
}
