//! Mutations with optimistic cache updates.

use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{ApiError, ValidationError};

use super::QueryCache;

/// A write operation coordinated with the [`QueryCache`].
///
/// Optionally applies an optimistic cache write before the mutation future
/// runs; if the mutation fails, the slot is rolled back to the snapshot
/// taken just before the write. On success, the listed query keys are
/// invalidated so the next read refetches server truth.
///
/// ## Examples
///
/// ```rust,ignore
/// let account = Mutation::new(Arc::clone(&cache))
///     .optimistic("accounts:7", &updated)?
///     .invalidates("accounts:list")
///     .run(api.accounts.update("7", &body))
///     .await?;
/// ```
#[derive(Debug)]
pub struct Mutation {
    cache: Arc<QueryCache>,
    optimistic: Option<(String, Value)>,
    invalidates: Vec<String>,
}

impl Mutation {
    /// Creates a mutation against the given cache.
    pub fn new(cache: Arc<QueryCache>) -> Self {
        Self {
            cache,
            optimistic: None,
            invalidates: Vec::new(),
        }
    }

    /// Writes `value` into `key` before the mutation runs.
    ///
    /// The prior slot state is snapshotted and restored if the mutation
    /// fails. List `key` in [`invalidates`](Self::invalidates) as well to
    /// refetch server truth after success.
    ///
    /// ## Errors
    ///
    /// Returns a validation error if the value cannot serialize to JSON.
    pub fn optimistic<T: Serialize>(mut self, key: impl Into<String>, value: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(value).map_err(ValidationError::JsonParse)?;
        self.optimistic = Some((key.into(), value));
        Ok(self)
    }

    /// Invalidates `key` after the mutation succeeds.
    pub fn invalidates(mut self, key: impl Into<String>) -> Self {
        self.invalidates.push(key.into());
        self
    }

    /// Runs the mutation.
    ///
    /// ## Errors
    ///
    /// Propagates the mutation error after rolling back any optimistic
    /// write.
    pub async fn run<T, Fut>(self, mutation: Fut) -> Result<T, ApiError>
    where
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let rollback = match &self.optimistic {
            Some((key, value)) => {
                let snapshot = self.cache.snapshot(key).await;
                self.cache.insert(key, value).await?;
                debug!(key, "applied optimistic write");
                Some(snapshot)
            }
            None => None,
        };

        match mutation.await {
            Ok(result) => {
                for key in &self.invalidates {
                    self.cache.invalidate(key).await;
                }
                Ok(result)
            }
            Err(error) => {
                if let Some(snapshot) = rollback {
                    debug!("mutation failed, rolling back optimistic write");
                    self.cache.restore(snapshot).await;
                }
                Err(error)
            }
        }
    }
}
