//! Schema validation contracts.
//!
//! Two duck-typed validator roles from the generated client layer are made
//! explicit traits here:
//!
//! - [`Validate`] - outbound constraint checks on request bodies and
//!   parameter structs, run before any network call.
//! - [`Validator`] - inbound parse-and-check of raw response JSON into a
//!   typed value, run after a successful network call.
//!
//! Typed structs already guarantee shape at compile time, so [`Validate`]
//! carries only the constraints the type system cannot express (bounds,
//! non-empty strings, finite numbers).

mod json;

pub use json::{CheckedJson, JsonOf, NoContent};

use crate::error::ValidationError;

/// Outbound validation for request bodies and parameter structs.
///
/// Implementations must be side-effect free: a failing check means the
/// request is never sent, and a passing check may be re-run on retry.
pub trait Validate {
    /// Checks the declared constraints, returning the first violation.
    fn check(&self) -> Result<(), ValidationError>;
}

/// Inbound validation: parses raw response JSON into a typed value.
///
/// A failure here means the server answered 2xx but violated the shape
/// contract; it surfaces as [`ValidationError`], distinct from a status
/// error.
pub trait Validator: Send + Sync {
    /// The typed value produced on success.
    type Output: Send;

    /// Parses and checks the raw value.
    fn validate(&self, raw: serde_json::Value) -> Result<Self::Output, ValidationError>;
}

/// Checks that a string field is non-empty after trimming.
pub fn non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::constraint(field, "must not be empty"));
    }
    Ok(())
}

/// Checks that a floating-point amount is finite.
pub fn finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::constraint(field, "must be a finite number"));
    }
    Ok(())
}

/// Checks that an optional value, when present, lies in `min..=max`.
pub fn in_range(
    field: &'static str,
    value: Option<u32>,
    min: u32,
    max: u32,
) -> Result<(), ValidationError> {
    if let Some(v) = value {
        if v < min || v > max {
            return Err(ValidationError::constraint(
                field,
                format!("must be between {min} and {max}"),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty() {
        assert!(non_empty("name", "Cafe Aurora").is_ok());
        assert!(non_empty("name", "   ").is_err());
        assert!(non_empty("name", "").is_err());
    }

    #[test]
    fn test_finite() {
        assert!(finite("amount", 100.0).is_ok());
        assert!(finite("amount", -0.5).is_ok());
        assert!(finite("amount", f64::NAN).is_err());
        assert!(finite("amount", f64::INFINITY).is_err());
    }

    #[test]
    fn test_in_range() {
        assert!(in_range("page_size", None, 1, 100).is_ok());
        assert!(in_range("page_size", Some(50), 1, 100).is_ok());
        assert!(in_range("page_size", Some(0), 1, 100).is_err());
        assert!(in_range("page_size", Some(101), 1, 100).is_err());
    }
}
