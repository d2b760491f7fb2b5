//! Campaign resource types.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::schema::{in_range, non_empty, Validate};

/// Lifecycle state of a campaign.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    /// Not yet published.
    #[default]
    Draft,
    /// Live and earning.
    Active,
    /// Temporarily suspended.
    Paused,
    /// Finished; read-only.
    Ended,
}

/// A points-earning marketing campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    /// Opaque campaign identifier.
    pub id: String,
    /// Campaign display name.
    pub name: String,
    /// Customer-facing description.
    #[serde(default)]
    pub description: Option<String>,
    /// Lifecycle state.
    pub status: CampaignStatus,
    /// RFC 3339 start timestamp.
    pub starts_at: String,
    /// RFC 3339 end timestamp, open-ended when absent.
    #[serde(default)]
    pub ends_at: Option<String>,
    /// Points awarded per qualifying purchase.
    pub reward_points: i64,
}

/// Body for creating a campaign.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignCreate {
    /// Campaign display name.
    pub name: String,
    /// Customer-facing description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// RFC 3339 start timestamp.
    pub starts_at: String,
    /// RFC 3339 end timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<String>,
    /// Points awarded per qualifying purchase.
    pub reward_points: i64,
}

impl Validate for CampaignCreate {
    fn check(&self) -> Result<(), ValidationError> {
        non_empty("name", &self.name)?;
        non_empty("starts_at", &self.starts_at)?;
        if self.reward_points <= 0 {
            return Err(ValidationError::constraint(
                "reward_points",
                "must be positive",
            ));
        }
        Ok(())
    }
}

/// Body for replacing a campaign (PUT).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignUpdate {
    /// Campaign display name.
    pub name: String,
    /// Customer-facing description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// RFC 3339 start timestamp.
    pub starts_at: String,
    /// RFC 3339 end timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<String>,
    /// Points awarded per qualifying purchase.
    pub reward_points: i64,
}

impl Validate for CampaignUpdate {
    fn check(&self) -> Result<(), ValidationError> {
        non_empty("name", &self.name)?;
        non_empty("starts_at", &self.starts_at)?;
        if self.reward_points <= 0 {
            return Err(ValidationError::constraint(
                "reward_points",
                "must be positive",
            ));
        }
        Ok(())
    }
}

/// Body for partially updating a campaign (PATCH).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignPatch {
    /// New name, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New end timestamp, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<String>,
    /// New reward points, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward_points: Option<i64>,
}

impl Validate for CampaignPatch {
    fn check(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            non_empty("name", name)?;
        }
        if let Some(points) = self.reward_points {
            if points <= 0 {
                return Err(ValidationError::constraint(
                    "reward_points",
                    "must be positive",
                ));
            }
        }
        Ok(())
    }
}

/// Query parameters for listing campaigns.
#[derive(Debug, Clone, Default)]
pub struct CampaignListParams {
    /// 1-based page number.
    pub page: Option<u32>,
    /// Page size, 1 to 100.
    pub page_size: Option<u32>,
    /// Filter by lifecycle state.
    pub status: Option<CampaignStatus>,
}

impl Validate for CampaignListParams {
    fn check(&self) -> Result<(), ValidationError> {
        if self.page == Some(0) {
            return Err(ValidationError::constraint("page", "pages are 1-based"));
        }
        in_range("page_size", self.page_size, 1, 100)
    }
}

impl CampaignListParams {
    pub(crate) fn status_name(&self) -> Option<&'static str> {
        self.status.map(|s| match s {
            CampaignStatus::Draft => "draft",
            CampaignStatus::Active => "active",
            CampaignStatus::Paused => "paused",
            CampaignStatus::Ended => "ended",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_requires_positive_points() {
        let body = CampaignCreate {
            name: "Double Points Week".to_string(),
            starts_at: "2026-01-01T00:00:00Z".to_string(),
            reward_points: 0,
            ..Default::default()
        };
        assert!(body.check().is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(CampaignStatus::Paused).unwrap(),
            serde_json::json!("paused")
        );
    }

    #[test]
    fn test_patch_rejects_zero_points() {
        let patch = CampaignPatch {
            reward_points: Some(0),
            ..Default::default()
        };
        assert!(patch.check().is_err());
    }
}
