//! Coupons resource client.

use std::sync::Arc;

use crate::client::RequestExecutor;
use crate::error::{ApiError, ValidationError};
use crate::method::RestMethod;
use crate::middleware::{ContextTag, MiddlewareStack};
use crate::models::{
    Coupon, CouponCreate, CouponListParams, CouponPatch, CouponUpdate, Page, RedemptionReceipt,
    RedemptionRequest,
};
use crate::request::RequestConfig;
use crate::response::ClientResponse;
use crate::schema::{JsonOf, NoContent, Validate};

/// Client for the coupons resource.
#[derive(Debug)]
pub struct CouponsClient {
    exec: Arc<RequestExecutor>,
    middleware: MiddlewareStack,
}

impl CouponsClient {
    pub(crate) fn new(exec: Arc<RequestExecutor>) -> Self {
        let middleware = MiddlewareStack::builder()
            .with(ContextTag::new("coupons"))
            .build();
        Self { exec, middleware }
    }

    fn config(&self) -> RequestConfig {
        RequestConfig::new().middleware(self.middleware.clone())
    }

    /// Lists coupons, paginated.
    ///
    /// `codes` is repeated in the query string, one `code=` pair per entry.
    pub async fn list(
        &self,
        params: &CouponListParams,
    ) -> Result<ClientResponse<Page<Coupon>>, ApiError> {
        params.check()?;
        let mut config = self
            .config()
            .query_opt("page", params.page)
            .query_opt("page_size", params.page_size)
            .query_opt("redeemable_only", params.redeemable_only);
        if !params.codes.is_empty() {
            config = config.query("code", params.codes.clone());
        }
        self.exec
            .execute(
                RestMethod::Get,
                "/coupons/",
                config,
                &JsonOf::<Page<Coupon>>::new(),
            )
            .await
    }

    /// Creates a coupon.
    pub async fn create(&self, body: &CouponCreate) -> Result<ClientResponse<Coupon>, ApiError> {
        body.check()?;
        let config = self
            .config()
            .body(serde_json::to_value(body).map_err(ValidationError::JsonParse)?);
        self.exec
            .execute(
                RestMethod::Post,
                "/coupons/",
                config,
                &JsonOf::<Coupon>::new(),
            )
            .await
    }

    /// Reads a single coupon.
    pub async fn read(&self, id: &str) -> Result<ClientResponse<Coupon>, ApiError> {
        let config = self.config().path_param("id", id);
        self.exec
            .execute(
                RestMethod::Get,
                "/coupons/{id}/",
                config,
                &JsonOf::<Coupon>::new(),
            )
            .await
    }

    /// Replaces a coupon.
    pub async fn update(
        &self,
        id: &str,
        body: &CouponUpdate,
    ) -> Result<ClientResponse<Coupon>, ApiError> {
        body.check()?;
        let config = self
            .config()
            .path_param("id", id)
            .body(serde_json::to_value(body).map_err(ValidationError::JsonParse)?);
        self.exec
            .execute(
                RestMethod::Put,
                "/coupons/{id}/",
                config,
                &JsonOf::<Coupon>::new(),
            )
            .await
    }

    /// Partially updates a coupon.
    pub async fn partial_update(
        &self,
        id: &str,
        body: &CouponPatch,
    ) -> Result<ClientResponse<Coupon>, ApiError> {
        body.check()?;
        let config = self
            .config()
            .path_param("id", id)
            .body(serde_json::to_value(body).map_err(ValidationError::JsonParse)?);
        self.exec
            .execute(
                RestMethod::Patch,
                "/coupons/{id}/",
                config,
                &JsonOf::<Coupon>::new(),
            )
            .await
    }

    /// Deletes a coupon.
    pub async fn delete(&self, id: &str) -> Result<ClientResponse<()>, ApiError> {
        let config = self.config().path_param("id", id);
        self.exec
            .execute(RestMethod::Delete, "/coupons/{id}/", config, &NoContent)
            .await
    }

    /// Redeems a coupon for an account.
    pub async fn redeem(
        &self,
        id: &str,
        body: &RedemptionRequest,
    ) -> Result<ClientResponse<RedemptionReceipt>, ApiError> {
        body.check()?;
        let config = self
            .config()
            .path_param("id", id)
            .body(serde_json::to_value(body).map_err(ValidationError::JsonParse)?);
        self.exec
            .execute(
                RestMethod::Post,
                "/coupons/{id}/redeem/",
                config,
                &JsonOf::<RedemptionReceipt>::new(),
            )
            .await
    }
}
