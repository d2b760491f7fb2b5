//! License resource types.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::schema::{in_range, non_empty, Validate};

/// Lifecycle state of a merchant license.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseStatus {
    /// Valid and in use.
    Active,
    /// Past its validity window.
    Expired,
    /// Administratively revoked.
    Revoked,
}

/// A merchant license for the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct License {
    /// Opaque license identifier.
    pub id: String,
    /// The license key.
    pub key: String,
    /// Number of seats covered.
    pub seat_count: u32,
    /// Lifecycle state.
    pub status: LicenseStatus,
    /// RFC 3339 end of the validity window.
    pub valid_until: String,
}

/// Body for the verify action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicenseVerifyRequest {
    /// The license key to verify.
    pub key: String,
}

impl Validate for LicenseVerifyRequest {
    fn check(&self) -> Result<(), ValidationError> {
        non_empty("key", &self.key)
    }
}

/// Response from the verify action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicenseVerification {
    /// Whether the key names a currently valid license.
    pub valid: bool,
    /// The matched license, when valid.
    #[serde(default)]
    pub license: Option<License>,
    /// Why verification failed, when invalid.
    #[serde(default)]
    pub reason: Option<String>,
}

/// Query parameters for listing licenses.
#[derive(Debug, Clone, Default)]
pub struct LicenseListParams {
    /// 1-based page number.
    pub page: Option<u32>,
    /// Page size, 1 to 100.
    pub page_size: Option<u32>,
}

impl Validate for LicenseListParams {
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
    fn test_verify_requires_key() {
        assert!(LicenseVerifyRequest { key: " ".to_string() }.check().is_err());
        assert!(LicenseVerifyRequest {
            key: "LIC-1234".to_string()
        }
        .check()
        .is_ok());
    }

    #[test]
    fn test_verification_deserializes_invalid() {
        let verification: LicenseVerification = serde_json::from_value(serde_json::json!({
            "valid": false,
            "reason": "revoked"
        }))
        .unwrap();
        assert!(!verification.valid);
        assert!(verification.license.is_none());
    }
}
