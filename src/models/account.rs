//! Account resource types.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::schema::{finite, in_range, non_empty, Validate};

/// Loyalty tier of an account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountTier {
    /// Entry tier for new accounts.
    #[default]
    Standard,
    /// First earned tier.
    Silver,
    /// Second earned tier.
    Gold,
    /// Top tier.
    Platinum,
}

/// A customer loyalty account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Opaque account identifier.
    pub id: String,
    /// Display name of the account owner.
    pub owner_name: String,
    /// Contact email.
    pub email: String,
    /// Stored-value balance in the account currency.
    pub balance: f64,
    /// Accumulated loyalty points.
    pub points: i64,
    /// Current tier.
    #[serde(default)]
    pub tier: AccountTier,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    /// RFC 3339 last-update timestamp.
    pub updated_at: String,
}

impl Validate for Account {
    fn check(&self) -> Result<(), ValidationError> {
        non_empty("id", &self.id)?;
        finite("balance", self.balance)
    }
}

/// Body for creating an account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountCreate {
    /// Display name of the account owner.
    pub owner_name: String,
    /// Contact email.
    pub email: String,
    /// Opening balance; zero when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_balance: Option<f64>,
}

impl Validate for AccountCreate {
    fn check(&self) -> Result<(), ValidationError> {
        non_empty("owner_name", &self.owner_name)?;
        non_empty("email", &self.email)?;
        if !self.email.contains('@') {
            return Err(ValidationError::constraint("email", "must be an email address"));
        }
        if let Some(balance) = self.initial_balance {
            finite("initial_balance", balance)?;
            if balance < 0.0 {
                return Err(ValidationError::constraint(
                    "initial_balance",
                    "must not be negative",
                ));
            }
        }
        Ok(())
    }
}

/// Body for replacing an account (PUT).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountUpdate {
    /// Display name of the account owner.
    pub owner_name: String,
    /// Contact email.
    pub email: String,
    /// Tier to assign.
    pub tier: AccountTier,
}

impl Validate for AccountUpdate {
    fn check(&self) -> Result<(), ValidationError> {
        non_empty("owner_name", &self.owner_name)?;
        non_empty("email", &self.email)?;
        if !self.email.contains('@') {
            return Err(ValidationError::constraint("email", "must be an email address"));
        }
        Ok(())
    }
}

/// Body for partially updating an account (PATCH). Absent fields are
/// left unchanged by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountPatch {
    /// New owner name, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    /// New email, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New tier, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<AccountTier>,
}

impl Validate for AccountPatch {
    fn check(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.owner_name {
            non_empty("owner_name", name)?;
        }
        if let Some(email) = &self.email {
            non_empty("email", email)?;
            if !email.contains('@') {
                return Err(ValidationError::constraint("email", "must be an email address"));
            }
        }
        Ok(())
    }
}

/// Body for the balance adjustment action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceAdjustment {
    /// Signed amount to add to the balance.
    pub amount: f64,
    /// Optional audit note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Validate for BalanceAdjustment {
    fn check(&self) -> Result<(), ValidationError> {
        finite("amount", self.amount)?;
        if let Some(reason) = &self.reason {
            non_empty("reason", reason)?;
        }
        Ok(())
    }
}

/// Query parameters for listing accounts.
#[derive(Debug, Clone, Default)]
pub struct AccountListParams {
    /// 1-based page number.
    pub page: Option<u32>,
    /// Page size, 1 to 100.
    pub page_size: Option<u32>,
    /// Free-text search over owner name and email.
    pub search: Option<String>,
    /// Filter by tier.
    pub tier: Option<AccountTier>,
}

impl Validate for AccountListParams {
    fn check(&self) -> Result<(), ValidationError> {
        if self.page == Some(0) {
            return Err(ValidationError::constraint("page", "pages are 1-based"));
        }
        in_range("page_size", self.page_size, 1, 100)
    }
}

impl AccountListParams {
    pub(crate) fn tier_name(&self) -> Option<&'static str> {
        self.tier.map(|t| match t {
            AccountTier::Standard => "standard",
            AccountTier::Silver => "silver",
            AccountTier::Gold => "gold",
            AccountTier::Platinum => "platinum",
        })
    }
}
