//! Coupon resource types.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::schema::{finite, in_range, non_empty, Validate};

/// A redeemable discount coupon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coupon {
    /// Opaque coupon identifier.
    pub id: String,
    /// Redemption code shown to the customer.
    pub code: String,
    /// Customer-facing description.
    #[serde(default)]
    pub description: Option<String>,
    /// Discount as a percentage, 0 to 100.
    pub discount_percent: f64,
    /// RFC 3339 expiry timestamp.
    #[serde(default)]
    pub expires_at: Option<String>,
    /// Whether this coupon has already been redeemed.
    pub redeemed: bool,
}

/// Body for creating a coupon.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CouponCreate {
    /// Redemption code.
    pub code: String,
    /// Customer-facing description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Discount as a percentage, 0 to 100.
    pub discount_percent: f64,
    /// RFC 3339 expiry timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

fn check_discount(value: f64) -> Result<(), ValidationError> {
    finite("discount_percent", value)?;
    if !(0.0..=100.0).contains(&value) {
        return Err(ValidationError::constraint(
            "discount_percent",
            "must be between 0 and 100",
        ));
    }
    Ok(())
}

impl Validate for CouponCreate {
    fn check(&self) -> Result<(), ValidationError> {
        non_empty("code", &self.code)?;
        check_discount(self.discount_percent)
    }
}

/// Body for replacing a coupon (PUT).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponUpdate {
    /// Customer-facing description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Discount as a percentage, 0 to 100.
    pub discount_percent: f64,
    /// RFC 3339 expiry timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

impl Validate for CouponUpdate {
    fn check(&self) -> Result<(), ValidationError> {
        check_discount(self.discount_percent)
    }
}

/// Body for partially updating a coupon (PATCH).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CouponPatch {
    /// New description, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New discount, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<f64>,
    /// New expiry, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

impl Validate for CouponPatch {
    fn check(&self) -> Result<(), ValidationError> {
        if let Some(discount) = self.discount_percent {
            check_discount(discount)?;
        }
        Ok(())
    }
}

/// Body for the redeem action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedemptionRequest {
    /// Account redeeming the coupon.
    pub account_id: String,
    /// Branch where the redemption happened, when in-store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,
}

impl Validate for RedemptionRequest {
    fn check(&self) -> Result<(), ValidationError> {
        non_empty("account_id", &self.account_id)?;
        if let Some(branch) = &self.branch_id {
            non_empty("branch_id", branch)?;
        }
        Ok(())
    }
}

/// Response from the redeem action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedemptionReceipt {
    /// The coupon after redemption.
    pub coupon: Coupon,
    /// Account the redemption was applied to.
    pub account_id: String,
    /// RFC 3339 redemption timestamp.
    pub redeemed_at: String,
}

/// Query parameters for listing coupons.
#[derive(Debug, Clone, Default)]
pub struct CouponListParams {
    /// 1-based page number.
    pub page: Option<u32>,
    /// Page size, 1 to 100.
    pub page_size: Option<u32>,
    /// Only coupons that can still be redeemed.
    pub redeemable_only: Option<bool>,
    /// Filter by one or more codes; repeated in the query string.
    pub codes: Vec<String>,
}

impl Validate for CouponListParams {
    fn check(&self) -> Result<(), ValidationError> {
        if self.page == Some(0) {
            return Err(ValidationError::constraint("page", "pages are 1-based"));
        }
        in_range("page_size", self.page_size, 1, 100)
    }
}
