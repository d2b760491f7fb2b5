//! Per-resource API clients.
//!
//! One client per backend resource, one method per REST operation. Every
//! method is a thin call into the [`RequestExecutor`](crate::RequestExecutor):
//! validate params and body (fail fast, zero network calls on failure),
//! build the request configuration, execute, validate the response.
//!
//! ## Operations
//!
//! ### Accounts (7)
//! - `list` - GET /accounts/
//! - `create` - POST /accounts/
//! - `read` - GET /accounts/{id}/
//! - `update` - PUT /accounts/{id}/
//! - `partial_update` - PATCH /accounts/{id}/
//! - `delete` - DELETE /accounts/{id}/
//! - `update_balance` - POST /accounts/{id}/update-balance/
//!
//! ### Branches (6)
//! - `list` / `create` / `read` / `update` / `partial_update` / `delete`
//!
//! ### Campaigns (8)
//! - CRUD plus `activate` / `deactivate` - POST /campaigns/{id}/(de)activate/
//!
//! ### Coupons (7)
//! - CRUD plus `redeem` - POST /coupons/{id}/redeem/
//!
//! ### Licenses (3)
//! - `list` - GET /licenses/
//! - `read` - GET /licenses/{id}/
//! - `verify` - POST /licenses/verify/
//!
//! ### Notifications (5)
//! - `list` / `read` / `delete` plus `mark_read` - POST
//!   /notifications/{id}/mark-read/ and `mark_all_read` - POST
//!   /notifications/mark-all-read/
//!
//! Clients are stateless aside from their immutable middleware stack and
//! are safe to share as long-lived singletons.

mod accounts;
mod branches;
mod campaigns;
mod coupons;
mod licenses;
mod notifications;

pub use accounts::AccountsClient;
pub use branches::BranchesClient;
pub use campaigns::CampaignsClient;
pub use coupons::CouponsClient;
pub use licenses::LicensesClient;
pub use notifications::NotificationsClient;
