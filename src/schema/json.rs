//! JSON validator implementations.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use super::{Validate, Validator};
use crate::error::ValidationError;

/// Validator that deserializes JSON into `T` with no extra checks.
///
/// ## Examples
///
/// ```rust,ignore
/// use loyalty_api::schema::{JsonOf, Validator};
///
/// let schema: JsonOf<Account> = JsonOf::new();
/// let account = schema.validate(raw)?;
/// ```
#[derive(Debug)]
pub struct JsonOf<T>(PhantomData<fn() -> T>);

impl<T> JsonOf<T> {
    /// Creates the validator.
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for JsonOf<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for JsonOf<T> {
    fn clone(&self) -> Self {
        Self(PhantomData)
    }
}

impl<T: DeserializeOwned + Send> Validator for JsonOf<T> {
    type Output = T;

    fn validate(&self, raw: serde_json::Value) -> Result<T, ValidationError> {
        if raw.is_null() {
            return Err(ValidationError::EmptyBody);
        }
        serde_json::from_value(raw).map_err(ValidationError::JsonParse)
    }
}

/// Validator that deserializes into `T` and then runs its [`Validate`]
/// constraints.
///
/// Used for response types whose contract carries invariants beyond shape
/// (the same invariants enforced on outbound data).
#[derive(Debug)]
pub struct CheckedJson<T>(PhantomData<fn() -> T>);

impl<T> CheckedJson<T> {
    /// Creates the validator.
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for CheckedJson<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DeserializeOwned + Validate + Send> Validator for CheckedJson<T> {
    type Output = T;

    fn validate(&self, raw: serde_json::Value) -> Result<T, ValidationError> {
        let value: T = JsonOf::new().validate(raw)?;
        value.check()?;
        Ok(value)
    }
}

/// Validator for operations with no response body (204 deletes and the
/// like). Accepts an empty body; anything else is a contract violation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContent;

impl Validator for NoContent {
    type Output = ();

    fn validate(&self, raw: serde_json::Value) -> Result<(), ValidationError> {
        if raw.is_null() {
            Ok(())
        } else {
            Err(ValidationError::UnexpectedBody)
        }
    }
}
