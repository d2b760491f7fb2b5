//! Licenses resource client.

use std::sync::Arc;

use crate::client::RequestExecutor;
use crate::error::{ApiError, ValidationError};
use crate::method::RestMethod;
use crate::middleware::{ContextTag, MiddlewareStack};
use crate::models::{License, LicenseListParams, LicenseVerification, LicenseVerifyRequest, Page};
use crate::request::RequestConfig;
use crate::response::ClientResponse;
use crate::schema::{JsonOf, Validate};

/// Client for the licenses resource.
///
/// Licenses are provisioned out of band; this client only reads them and
/// verifies keys.
#[derive(Debug)]
pub struct LicensesClient {
    exec: Arc<RequestExecutor>,
    middleware: MiddlewareStack,
}

impl LicensesClient {
    pub(crate) fn new(exec: Arc<RequestExecutor>) -> Self {
        let middleware = MiddlewareStack::builder()
            .with(ContextTag::new("licenses"))
            .build();
        Self { exec, middleware }
    }

    fn config(&self) -> RequestConfig {
        RequestConfig::new().middleware(self.middleware.clone())
    }

    /// Lists licenses, paginated.
    pub async fn list(
        &self,
        params: &LicenseListParams,
    ) -> Result<ClientResponse<Page<License>>, ApiError> {
        params.check()?;
        let config = self
            .config()
            .query_opt("page", params.page)
            .query_opt("page_size", params.page_size);
        self.exec
            .execute(
                RestMethod::Get,
                "/licenses/",
                config,
                &JsonOf::<Page<License>>::new(),
            )
            .await
    }

    /// Reads a single license.
    pub async fn read(&self, id: &str) -> Result<ClientResponse<License>, ApiError> {
        let config = self.config().path_param("id", id);
        self.exec
            .execute(
                RestMethod::Get,
                "/licenses/{id}/",
                config,
                &JsonOf::<License>::new(),
            )
            .await
    }

    /// Verifies a license key.
    ///
    /// An unknown or revoked key is not an error; the server answers 200
    /// with `valid: false` and a reason.
    pub async fn verify(
        &self,
        body: &LicenseVerifyRequest,
    ) -> Result<ClientResponse<LicenseVerification>, ApiError> {
        body.check()?;
        let config = self
            .config()
            .body(serde_json::to_value(body).map_err(ValidationError::JsonParse)?);
        self.exec
            .execute(
                RestMethod::Post,
                "/licenses/verify/",
                config,
                &JsonOf::<LicenseVerification>::new(),
            )
            .await
    }
}
