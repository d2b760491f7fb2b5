//! Campaigns resource client.

use std::sync::Arc;

use crate::client::RequestExecutor;
use crate::error::{ApiError, ValidationError};
use crate::method::RestMethod;
use crate::middleware::{ContextTag, MiddlewareStack};
use crate::models::{
    Campaign, CampaignCreate, CampaignListParams, CampaignPatch, CampaignUpdate, Page,
};
use crate::request::RequestConfig;
use crate::response::ClientResponse;
use crate::schema::{JsonOf, NoContent, Validate};

/// Client for the campaigns resource.
///
/// Beyond CRUD, campaigns expose lifecycle actions: [`activate`](Self::activate)
/// moves a draft or paused campaign to `active`, [`deactivate`](Self::deactivate)
/// pauses it. Both are bodiless POSTs and return the updated campaign.
#[derive(Debug)]
pub struct CampaignsClient {
    exec: Arc<RequestExecutor>,
    middleware: MiddlewareStack,
}

impl CampaignsClient {
    pub(crate) fn new(exec: Arc<RequestExecutor>) -> Self {
        let middleware = MiddlewareStack::builder()
            .with(ContextTag::new("campaigns"))
            .build();
        Self { exec, middleware }
    }

    fn config(&self) -> RequestConfig {
        RequestConfig::new().middleware(self.middleware.clone())
    }

    /// Lists campaigns, paginated.
    pub async fn list(
        &self,
        params: &CampaignListParams,
    ) -> Result<ClientResponse<Page<Campaign>>, ApiError> {
        params.check()?;
        let config = self
            .config()
            .query_opt("page", params.page)
            .query_opt("page_size", params.page_size)
            .query_opt("status", params.status_name());
        self.exec
            .execute(
                RestMethod::Get,
                "/campaigns/",
                config,
                &JsonOf::<Page<Campaign>>::new(),
            )
            .await
    }

    /// Creates a campaign.
    pub async fn create(
        &self,
        body: &CampaignCreate,
    ) -> Result<ClientResponse<Campaign>, ApiError> {
        body.check()?;
        let config = self
            .config()
            .body(serde_json::to_value(body).map_err(ValidationError::JsonParse)?);
        self.exec
            .execute(
                RestMethod::Post,
                "/campaigns/",
                config,
                &JsonOf::<Campaign>::new(),
            )
            .await
    }

    /// Reads a single campaign.
    pub async fn read(&self, id: &str) -> Result<ClientResponse<Campaign>, ApiError> {
        let config = self.config().path_param("id", id);
        self.exec
            .execute(
                RestMethod::Get,
                "/campaigns/{id}/",
                config,
                &JsonOf::<Campaign>::new(),
            )
            .await
    }

    /// Replaces a campaign.
    pub async fn update(
        &self,
        id: &str,
        body: &CampaignUpdate,
    ) -> Result<ClientResponse<Campaign>, ApiError> {
        body.check()?;
        let config = self
            .config()
            .path_param("id", id)
            .body(serde_json::to_value(body).map_err(ValidationError::JsonParse)?);
        self.exec
            .execute(
                RestMethod::Put,
                "/campaigns/{id}/",
                config,
                &JsonOf::<Campaign>::new(),
            )
            .await
    }

    /// Partially updates a campaign.
    pub async fn partial_update(
        &self,
        id: &str,
        body: &CampaignPatch,
    ) -> Result<ClientResponse<Campaign>, ApiError> {
        body.check()?;
        let config = self
            .config()
            .path_param("id", id)
            .body(serde_json::to_value(body).map_err(ValidationError::JsonParse)?);
        self.exec
            .execute(
                RestMethod::Patch,
                "/campaigns/{id}/",
                config,
                &JsonOf::<Campaign>::new(),
            )
            .await
    }

    /// Deletes a campaign.
    pub async fn delete(&self, id: &str) -> Result<ClientResponse<()>, ApiError> {
        let config = self.config().path_param("id", id);
        self.exec
            .execute(RestMethod::Delete, "/campaigns/{id}/", config, &NoContent)
            .await
    }

    /// Moves a campaign to the `active` state.
    pub async fn activate(&self, id: &str) -> Result<ClientResponse<Campaign>, ApiError> {
        let config = self.config().path_param("id", id);
        self.exec
            .execute(
                RestMethod::Post,
                "/campaigns/{id}/activate/",
                config,
                &JsonOf::<Campaign>::new(),
            )
            .await
    }

    /// Pauses an active campaign.
    pub async fn deactivate(&self, id: &str) -> Result<ClientResponse<Campaign>, ApiError> {
        let config = self.config().path_param("id", id);
        self.exec
            .execute(
                RestMethod::Post,
                "/campaigns/{id}/deactivate/",
                config,
                &JsonOf::<Campaign>::new(),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn client() -> CampaignsClient {
        let base_url = Url::parse("http://127.0.0.1:9").unwrap();
        CampaignsClient::new(Arc::new(RequestExecutor::new(base_url).unwrap()))
    }

    #[tokio::test]
    async fn test_create_rejects_nonpositive_points_before_network() {
        let body = CampaignCreate {
            name: "Double Points".to_string(),
            starts_at: "2026-01-01T00:00:00Z".to_string(),
            reward_points: -5,
            ..Default::default()
        };
        let err = client().create(&body).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
