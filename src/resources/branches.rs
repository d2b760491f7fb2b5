//! Branches resource client.

use std::sync::Arc;

use crate::client::RequestExecutor;
use crate::error::{ApiError, ValidationError};
use crate::method::RestMethod;
use crate::middleware::{ContextTag, MiddlewareStack};
use crate::models::{Branch, BranchCreate, BranchListParams, BranchPatch, BranchUpdate, Page};
use crate::request::RequestConfig;
use crate::response::ClientResponse;
use crate::schema::{JsonOf, NoContent, Validate};

/// Client for the branches resource.
#[derive(Debug)]
pub struct BranchesClient {
    exec: Arc<RequestExecutor>,
    middleware: MiddlewareStack,
}

impl BranchesClient {
    pub(crate) fn new(exec: Arc<RequestExecutor>) -> Self {
        let middleware = MiddlewareStack::builder()
            .with(ContextTag::new("branches"))
            .build();
        Self { exec, middleware }
    }

    fn config(&self) -> RequestConfig {
        RequestConfig::new().middleware(self.middleware.clone())
    }

    /// Lists branches, paginated.
    pub async fn list(
        &self,
        params: &BranchListParams,
    ) -> Result<ClientResponse<Page<Branch>>, ApiError> {
        params.check()?;
        let config = self
            .config()
            .query_opt("page", params.page)
            .query_opt("page_size", params.page_size)
            .query_opt("search", params.search.clone())
            .query_opt("city", params.city.clone())
            .query_opt("is_active", params.is_active);
        self.exec
            .execute(
                RestMethod::Get,
                "/branches/",
                config,
                &JsonOf::<Page<Branch>>::new(),
            )
            .await
    }

    /// Creates a branch.
    pub async fn create(&self, body: &BranchCreate) -> Result<ClientResponse<Branch>, ApiError> {
        body.check()?;
        let config = self
            .config()
            .body(serde_json::to_value(body).map_err(ValidationError::JsonParse)?);
        self.exec
            .execute(
                RestMethod::Post,
                "/branches/",
                config,
                &JsonOf::<Branch>::new(),
            )
            .await
    }

    /// Reads a single branch.
    pub async fn read(&self, id: &str) -> Result<ClientResponse<Branch>, ApiError> {
        let config = self.config().path_param("id", id);
        self.exec
            .execute(
                RestMethod::Get,
                "/branches/{id}/",
                config,
                &JsonOf::<Branch>::new(),
            )
            .await
    }

    /// Replaces a branch.
    pub async fn update(
        &self,
        id: &str,
        body: &BranchUpdate,
    ) -> Result<ClientResponse<Branch>, ApiError> {
        body.check()?;
        let config = self
            .config()
            .path_param("id", id)
            .body(serde_json::to_value(body).map_err(ValidationError::JsonParse)?);
        self.exec
            .execute(
                RestMethod::Put,
                "/branches/{id}/",
                config,
                &JsonOf::<Branch>::new(),
            )
            .await
    }

    /// Partially updates a branch.
    pub async fn partial_update(
        &self,
        id: &str,
        body: &BranchPatch,
    ) -> Result<ClientResponse<Branch>, ApiError> {
        body.check()?;
        let config = self
            .config()
            .path_param("id", id)
            .body(serde_json::to_value(body).map_err(ValidationError::JsonParse)?);
        self.exec
            .execute(
                RestMethod::Patch,
                "/branches/{id}/",
                config,
                &JsonOf::<Branch>::new(),
            )
            .await
    }

    /// Deletes a branch.
    pub async fn delete(&self, id: &str) -> Result<ClientResponse<()>, ApiError> {
        let config = self.config().path_param("id", id);
        self.exec
            .execute(RestMethod::Delete, "/branches/{id}/", config, &NoContent)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn client() -> BranchesClient {
        let base_url = Url::parse("http://127.0.0.1:9").unwrap();
        BranchesClient::new(Arc::new(RequestExecutor::new(base_url).unwrap()))
    }

    #[tokio::test]
    async fn test_create_rejects_empty_city_before_network() {
        let body = BranchCreate {
            name: "Downtown".to_string(),
            address: "1 Main St".to_string(),
            city: String::new(),
            phone: None,
        };
        let err = client().create(&body).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
