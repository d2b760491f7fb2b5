//! Branch resource types.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::schema::{in_range, non_empty, Validate};

/// A physical branch location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    /// Opaque branch identifier.
    pub id: String,
    /// Branch display name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// City name.
    pub city: String,
    /// Latitude, when geocoded.
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude, when geocoded.
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Whether the branch is currently open for business.
    pub is_active: bool,
}

/// Body for creating a branch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BranchCreate {
    /// Branch display name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// City name.
    pub city: String,
    /// Contact phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Validate for BranchCreate {
    fn check(&self) -> Result<(), ValidationError> {
        non_empty("name", &self.name)?;
        non_empty("address", &self.address)?;
        non_empty("city", &self.city)
    }
}

/// Body for replacing a branch (PUT).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchUpdate {
    /// Branch display name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// City name.
    pub city: String,
    /// Contact phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Whether the branch is open for business.
    pub is_active: bool,
}

impl Validate for BranchUpdate {
    fn check(&self) -> Result<(), ValidationError> {
        non_empty("name", &self.name)?;
        non_empty("address", &self.address)?;
        non_empty("city", &self.city)
    }
}

/// Body for partially updating a branch (PATCH).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BranchPatch {
    /// New name, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New address, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// New city, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// New active flag, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl Validate for BranchPatch {
    fn check(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            non_empty("name", name)?;
        }
        if let Some(address) = &self.address {
            non_empty("address", address)?;
        }
        if let Some(city) = &self.city {
            non_empty("city", city)?;
        }
        Ok(())
    }
}

/// Query parameters for listing branches.
#[derive(Debug, Clone, Default)]
pub struct BranchListParams {
    /// 1-based page number.
    pub page: Option<u32>,
    /// Page size, 1 to 100.
    pub page_size: Option<u32>,
    /// Free-text search over name and address.
    pub search: Option<String>,
    /// Filter by city.
    pub city: Option<String>,
    /// Filter by active flag.
    pub is_active: Option<bool>,
}

impl Validate for BranchListParams {
    fn check(&self) -> Result<(), ValidationError> {
        if self.page == Some(0) {
            return Err(ValidationError::constraint("page", "pages are 1-based"));
        }
        in_range("page_size", self.page_size, 1, 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_requires_fields() {
        let body = BranchCreate {
            name: "Downtown".to_string(),
            address: "1 Main St".to_string(),
            city: "".to_string(),
            phone: None,
        };
        assert!(matches!(
            body.check(),
            Err(ValidationError::Constraint { field: "city", .. })
        ));
    }

    #[test]
    fn test_patch_checks_present_fields_only() {
        let patch = BranchPatch {
            is_active: Some(false),
            ..Default::default()
        };
        assert!(patch.check().is_ok());

        let patch = BranchPatch {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(patch.check().is_err());
    }

    #[test]
    fn test_branch_deserializes_without_optionals() {
        let branch: Branch = serde_json::from_value(serde_json::json!({
            "id": "br_1",
            "name": "Downtown",
            "address": "1 Main St",
            "city": "Springfield",
            "is_active": true
        }))
        .unwrap();
        assert!(branch.latitude.is_none());
        assert!(branch.is_active);
    }
}
