//! Keyed query cache with fetch deduplication.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::{ApiError, ValidationError};

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    fetched_at: Instant,
}

impl CacheEntry {
    fn is_fresh(&self, stale_time: Duration) -> bool {
        self.fetched_at.elapsed() < stale_time
    }
}

/// A point-in-time copy of one cache slot, taken before an optimistic
/// write so the write can be undone.
///
/// `prior` of `None` means the key was absent; restoring such a snapshot
/// removes the key again.
#[derive(Debug, Clone)]
pub struct CacheSnapshot {
    key: String,
    prior: Option<CacheEntry>,
}

/// Keyed cache over query results.
///
/// Values are stored as JSON, so any serde type can share one cache. Each
/// key admits at most one in-flight fetch: concurrent misses on the same
/// key block behind the leader and read its result. A stale hit is served
/// immediately and refreshed by a background task.
///
/// Keys are caller-chosen strings; resource-prefixed keys such as
/// `accounts:list` or `accounts:42` compose with
/// [`invalidate_prefix`](Self::invalidate_prefix).
#[derive(Debug)]
pub struct QueryCache {
    stale_time: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
    fetch_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl QueryCache {
    /// Creates a cache whose entries count as fresh for `stale_time`.
    pub fn new(stale_time: Duration) -> Self {
        Self {
            stale_time,
            entries: Mutex::new(HashMap::new()),
            fetch_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached value for `key`, fetching it when missing.
    ///
    /// A fresh hit never invokes `fetch`. A stale hit is returned as-is
    /// and `fetch` runs in a background task to refresh the entry. On a
    /// miss, exactly one caller runs `fetch`; the rest await its result.
    ///
    /// ## Errors
    ///
    /// Propagates the fetch error on a miss, or a validation error when
    /// the cached JSON no longer decodes as `T`.
    pub async fn query<T, F, Fut>(self: &Arc<Self>, key: &str, fetch: F) -> Result<T, ApiError>
    where
        T: Serialize + DeserializeOwned + Send + Sync + 'static,
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        if let Some(entry) = self.lookup(key).await {
            if entry.is_fresh(self.stale_time) {
                debug!(key, "query cache hit");
                return decode(entry.value);
            }
            debug!(key, "query cache stale hit, refreshing in background");
            self.spawn_refresh(key, fetch).await;
            return decode(entry.value);
        }

        // Miss: one caller per key fetches, the rest queue on the lock and
        // find the entry populated once they hold it.
        let lock = self.fetch_lock(key).await;
        let _guard = lock.lock().await;
        if let Some(entry) = self.lookup(key).await {
            debug!(key, "query cache populated by concurrent fetch");
            return decode(entry.value);
        }

        debug!(key, "query cache miss, fetching");
        let value = fetch().await?;
        self.insert(key, &value).await?;
        Ok(value)
    }

    /// Stores a value under `key`, marking it freshly fetched.
    ///
    /// ## Errors
    ///
    /// Returns a validation error if the value cannot serialize to JSON.
    pub async fn insert<T: Serialize>(&self, key: &str, value: &T) -> Result<(), ApiError> {
        let value = serde_json::to_value(value).map_err(ValidationError::JsonParse)?;
        self.entries.lock().await.insert(
            key.to_string(),
            CacheEntry {
                value,
                fetched_at: Instant::now(),
            },
        );
        Ok(())
    }

    /// Returns the cached value for `key` without fetching.
    ///
    /// Staleness is ignored; a value that no longer decodes as `T` reads
    /// as absent.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let entry = self.lookup(key).await?;
        serde_json::from_value(entry.value).ok()
    }

    /// Removes the entry for `key`, if any.
    pub async fn invalidate(&self, key: &str) {
        self.entries.lock().await.remove(key);
    }

    /// Removes every entry whose key starts with `prefix`.
    pub async fn invalidate_prefix(&self, prefix: &str) {
        self.entries
            .lock()
            .await
            .retain(|key, _| !key.starts_with(prefix));
    }

    /// Captures the current state of `key` for later [`restore`](Self::restore).
    pub async fn snapshot(&self, key: &str) -> CacheSnapshot {
        CacheSnapshot {
            key: key.to_string(),
            prior: self.entries.lock().await.get(key).cloned(),
        }
    }

    /// Puts a slot back the way a snapshot recorded it, timestamp included.
    pub async fn restore(&self, snapshot: CacheSnapshot) {
        let mut entries = self.entries.lock().await;
        match snapshot.prior {
            Some(entry) => {
                entries.insert(snapshot.key, entry);
            }
            None => {
                entries.remove(&snapshot.key);
            }
        }
    }

    async fn lookup(&self, key: &str) -> Option<CacheEntry> {
        self.entries.lock().await.get(key).cloned()
    }

    async fn fetch_lock(&self, key: &str) -> Arc<Mutex<()>> {
        let mut locks = self.fetch_locks.lock().await;
        Arc::clone(locks.entry(key.to_string()).or_default())
    }

    async fn spawn_refresh<T, F, Fut>(self: &Arc<Self>, key: &str, fetch: F)
    where
        T: Serialize + Send + Sync + 'static,
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let lock = self.fetch_lock(key).await;
        let cache = Arc::clone(self);
        let key = key.to_string();
        tokio::spawn(async move {
            // A busy lock means a refresh is already underway
            let Ok(_guard) = lock.try_lock() else {
                return;
            };
            if let Some(entry) = cache.lookup(&key).await {
                if entry.is_fresh(cache.stale_time) {
                    return;
                }
            }
            match fetch().await {
                Ok(value) => {
                    if let Err(error) = cache.insert(&key, &value).await {
                        warn!(key, %error, "background refresh produced unserializable value");
                    }
                }
                Err(error) => {
                    // Stale entry stays; the next query retries
                    warn!(key, %error, "background refresh failed");
                }
            }
        });
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value)
        .map_err(ValidationError::JsonParse)
        .map_err(ApiError::from)
}
