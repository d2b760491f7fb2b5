//! Data types for the loyalty backend's resources.
//!
//! Entities mirror the backend's JSON shapes; request types carry the
//! [`Validate`](crate::schema::Validate) constraints that are checked
//! before any network call.

mod account;
mod branch;
mod campaign;
mod coupon;
mod license;
mod notification;

pub use account::{
    Account, AccountCreate, AccountListParams, AccountPatch, AccountTier, AccountUpdate,
    BalanceAdjustment,
};
pub use branch::{Branch, BranchCreate, BranchListParams, BranchPatch, BranchUpdate};
pub use campaign::{
    Campaign, CampaignCreate, CampaignListParams, CampaignPatch, CampaignStatus, CampaignUpdate,
};
pub use coupon::{
    Coupon, CouponCreate, CouponListParams, CouponPatch, CouponUpdate, RedemptionReceipt,
    RedemptionRequest,
};
pub use license::{License, LicenseListParams, LicenseStatus, LicenseVerification, LicenseVerifyRequest};
pub use notification::{MarkAllReadReceipt, Notification, NotificationListParams};

use serde::{Deserialize, Serialize};

/// Paginated list envelope used by every `list` operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Total number of results across all pages.
    pub count: u64,
    /// URL of the next page, if any.
    pub next: Option<String>,
    /// URL of the previous page, if any.
    pub previous: Option<String>,
    /// The results on this page.
    pub results: Vec<T>,
}

/// Backend health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Overall status, `"ok"` when healthy.
    pub status: String,
    /// Backend version string, when reported.
    #[serde(default)]
    pub version: Option<String>,
}

impl HealthStatus {
    /// Returns `true` when the backend reports itself healthy.
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_deserializes() {
        let page: Page<u64> = serde_json::from_value(serde_json::json!({
            "count": 3,
            "next": "https://api.example.com/accounts/?page=2",
            "previous": null,
            "results": [1, 2, 3]
        }))
        .unwrap();
        assert_eq!(page.count, 3);
        assert_eq!(page.results, vec![1, 2, 3]);
        assert!(page.previous.is_none());
    }

    #[test]
    fn test_health_status() {
        let health: HealthStatus =
            serde_json::from_value(serde_json::json!({"status": "ok"})).unwrap();
        assert!(health.is_ok());
        assert!(health.version.is_none());
    }
}
