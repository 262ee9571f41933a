//! Stale-while-revalidate fetch cache backed by moka
//!
//! The cache is an explicitly owned object handed to services through the
//! application state; there is no module-level singleton. Entries live for
//! the lifetime of the process - consumers going away never evicts a key,
//! only capacity pressure does.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use moka::future::Cache as MokaCache;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::domain::{DomainError, FetchKey};

/// Per-fetch behavior knobs.
///
/// Defaults suit low-churn reference data: an hour between automatic
/// refetches, no revalidation on stale reads, previous data kept across
/// failed refetches.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Minimum time between automatic refetches of the same key
    pub dedup_interval: Duration,
    /// Serve stale data and refresh in the background when the entry is
    /// older than the dedup interval
    pub revalidate_if_stale: bool,
    /// Keep the last known value when a refetch fails
    pub keep_previous_data: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            dedup_interval: Duration::from_secs(3600),
            revalidate_if_stale: false,
            keep_previous_data: true,
        }
    }
}

impl FetchOptions {
    pub fn with_dedup_interval(mut self, interval: Duration) -> Self {
        self.dedup_interval = interval;
        self
    }

    pub fn with_revalidate_if_stale(mut self, enabled: bool) -> Self {
        self.revalidate_if_stale = enabled;
        self
    }

    pub fn with_keep_previous_data(mut self, enabled: bool) -> Self {
        self.keep_previous_data = enabled;
        self
    }
}

/// Result of a cached fetch.
///
/// Loader failures never surface as errors here: `data` holds the last known
/// value (if any) and `is_error` is set, mirroring the fail-soft contract of
/// the client hooks this cache replaces.
#[derive(Debug)]
pub struct FetchOutcome<T> {
    pub data: Option<T>,
    pub is_error: bool,
    pub is_stale: bool,
}

impl<T> FetchOutcome<T> {
    /// Convert to a hard error when not even stale data is available
    pub fn ok_or_upstream(self, context: &str) -> Result<T, DomainError> {
        self.data
            .ok_or_else(|| DomainError::upstream(format!("No data available for {}", context)))
    }
}

/// One cached query result, stored as serialized JSON so entries of
/// different types share the cache.
#[derive(Debug, Clone)]
struct CacheEntry {
    data: Option<String>,
    fetched_at: Option<Instant>,
    /// Set by invalidation; forces exactly one reload on the next fetch
    needs_revalidation: bool,
    is_error: bool,
}

/// Shared stale-while-revalidate cache.
///
/// Cloning is cheap and clones share the same entries.
#[derive(Debug, Clone)]
pub struct SwrCache {
    entries: MokaCache<String, CacheEntry>,
    locks: Arc<Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>>,
}

impl SwrCache {
    pub fn new() -> Self {
        Self::with_capacity(10_000)
    }

    pub fn with_capacity(max_capacity: u64) -> Self {
        Self {
            entries: MokaCache::builder().max_capacity(max_capacity).build(),
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Fetch the value for `key`, loading it with `loader` when needed.
    ///
    /// Concurrent callers for the same missing key coalesce into a single
    /// loader invocation. A fresh entry is served without loading; a stale
    /// entry is served as-is, or served while a background refresh runs when
    /// `revalidate_if_stale` is set. An entry marked by [`invalidate`] is
    /// reloaded exactly once.
    ///
    /// [`invalidate`]: SwrCache::invalidate
    pub async fn fetch<T, F, Fut>(
        &self,
        key: &FetchKey,
        options: &FetchOptions,
        loader: F,
    ) -> FetchOutcome<T>
    where
        T: Serialize + DeserializeOwned + Send + 'static,
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, DomainError>> + Send + 'static,
    {
        let key_str = key.as_str();

        if let Some(entry) = self.entries.get(key_str).await {
            if entry.data.is_some() && !entry.needs_revalidation {
                if self.is_fresh(&entry, options) {
                    return Self::decode(key_str, &entry, false);
                }

                if !options.revalidate_if_stale {
                    return Self::decode(key_str, &entry, true);
                }

                // Serve stale data now, refresh in the background
                self.spawn_revalidation(key_str.to_string(), options.clone(), loader);
                return Self::decode(key_str, &entry, true);
            }
        }

        self.load(key_str, options, loader).await
    }

    /// Mark a single key for revalidation on its next fetch
    pub async fn invalidate(&self, key: &FetchKey) {
        if let Some(mut entry) = self.entries.get(key.as_str()).await {
            entry.needs_revalidation = true;
            self.entries.insert(key.as_str().to_string(), entry).await;
            debug!(key = %key, "cache entry marked for revalidation");
        }
    }

    /// Mark every entry whose key contains `fragment` for revalidation.
    ///
    /// Returns the number of entries marked.
    pub async fn invalidate_containing(&self, fragment: &str) -> usize {
        self.entries.run_pending_tasks().await;

        let matching: Vec<String> = self
            .entries
            .iter()
            .filter_map(|(key, _)| {
                let key: &str = key.as_ref();
                key.contains(fragment).then(|| key.to_string())
            })
            .collect();

        let mut marked = 0;

        for key in matching {
            if let Some(mut entry) = self.entries.get(&key).await {
                if !entry.needs_revalidation {
                    entry.needs_revalidation = true;
                    self.entries.insert(key, entry).await;
                    marked += 1;
                }
            }
        }

        debug!(fragment, marked, "broad revalidation issued");
        marked
    }

    /// Approximate number of cached entries
    pub async fn entry_count(&self) -> u64 {
        self.entries.run_pending_tasks().await;
        self.entries.entry_count()
    }

    /// All cached keys, for diagnostics
    pub async fn keys(&self) -> Vec<String> {
        self.entries.run_pending_tasks().await;
        self.entries.iter().map(|(k, _)| k.as_ref().to_string()).collect()
    }

    fn is_fresh(&self, entry: &CacheEntry, options: &FetchOptions) -> bool {
        entry
            .fetched_at
            .map(|at| at.elapsed() < options.dedup_interval)
            .unwrap_or(false)
    }

    fn decode<T: DeserializeOwned>(key: &str, entry: &CacheEntry, stale: bool) -> FetchOutcome<T> {
        let data = entry.data.as_deref().and_then(|json| {
            serde_json::from_str(json)
                .map_err(|e| warn!(key, error = %e, "cached value failed to deserialize"))
                .ok()
        });
        let decode_failed = entry.data.is_some() && data.is_none();

        FetchOutcome {
            data,
            is_error: entry.is_error || decode_failed,
            is_stale: stale,
        }
    }

    fn spawn_revalidation<T, F, Fut>(&self, key: String, options: FetchOptions, loader: F)
    where
        T: Serialize + DeserializeOwned + Send + 'static,
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, DomainError>> + Send + 'static,
    {
        let cache = self.clone();

        tokio::spawn(async move {
            let _ = cache.load::<T, F, Fut>(&key, &options, loader).await;
        });
    }

    /// Load under a per-key lock so concurrent misses coalesce
    async fn load<T, F, Fut>(&self, key: &str, options: &FetchOptions, loader: F) -> FetchOutcome<T>
    where
        T: Serialize + DeserializeOwned + Send + 'static,
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, DomainError>> + Send + 'static,
    {
        let lock = self.key_lock(key);
        let outcome = {
            let _guard = lock.lock().await;
            self.load_locked(key, options, loader).await
        };
        self.release_key_lock(key, &lock);
        outcome
    }

    async fn load_locked<T, F, Fut>(
        &self,
        key: &str,
        options: &FetchOptions,
        loader: F,
    ) -> FetchOutcome<T>
    where
        T: Serialize + DeserializeOwned + Send + 'static,
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, DomainError>> + Send + 'static,
    {
        // Another caller may have completed the load while we waited
        if let Some(entry) = self.entries.get(key).await {
            if entry.data.is_some() && !entry.needs_revalidation && self.is_fresh(&entry, options) {
                return Self::decode(key, &entry, false);
            }
        }

        let previous = self.entries.get(key).await;

        match loader().await {
            Ok(value) => {
                match serde_json::to_string(&value) {
                    Ok(json) => {
                        let entry = CacheEntry {
                            data: Some(json),
                            fetched_at: Some(Instant::now()),
                            needs_revalidation: false,
                            is_error: false,
                        };
                        self.entries.insert(key.to_string(), entry).await;
                    }
                    Err(e) => {
                        // Value is still usable by the caller, just not cacheable
                        warn!(key, error = %e, "fetched value failed to serialize");
                    }
                }

                FetchOutcome {
                    data: Some(value),
                    is_error: false,
                    is_stale: false,
                }
            }
            Err(error) => {
                warn!(key, error = %error, "fetch failed");

                let kept = previous
                    .as_ref()
                    .filter(|_| options.keep_previous_data)
                    .and_then(|e| e.data.clone());
                let entry = CacheEntry {
                    data: kept.clone(),
                    fetched_at: previous.as_ref().and_then(|e| e.fetched_at),
                    needs_revalidation: false,
                    is_error: true,
                };
                self.entries.insert(key.to_string(), entry).await;

                let data = kept.and_then(|json| serde_json::from_str(&json).ok());

                FetchOutcome {
                    data,
                    is_error: true,
                    is_stale: true,
                }
            }
        }
    }

    fn key_lock(&self, key: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().unwrap();
        locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }

    /// Drop the lock entry once the last caller for the key is done.
    ///
    /// The map would otherwise retain one entry per key ever fetched while
    /// moka evicts the entries themselves at capacity. Holding the map mutex
    /// makes the waiter count stable: two references mean the map and this
    /// caller only. `ptr_eq` guards against removing a successor lock
    /// inserted after an earlier removal.
    fn release_key_lock(&self, key: &str, lock: &Arc<tokio::sync::Mutex<()>>) {
        let mut locks = self.locks.lock().unwrap();

        if let Some(current) = locks.get(key) {
            if Arc::ptr_eq(current, lock) && Arc::strong_count(lock) <= 2 {
                locks.remove(key);
            }
        }
    }

    #[cfg(test)]
    fn lock_count(&self) -> usize {
        self.locks.lock().unwrap().len()
    }
}

impl Default for SwrCache {
    fn default() -> Self {
        Self::new()
    }
}
