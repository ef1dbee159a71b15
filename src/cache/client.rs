//! Cached wrapper for the report client

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::allocation::Instance;
use crate::cache::{CacheStorage, CacheTtl, cache_key};
use crate::client::AllocationApi;
use crate::error::Result;

/// Cached wrapper for any [`AllocationApi`] implementation.
///
/// Cache failures never fail a request; they only cost a download.
/// Only enabled with `--cache` or `cache: true` in config; otherwise every
/// run downloads the list.
pub struct CachedAllocationClient<C: AllocationApi> {
    inner: Arc<C>,
    cache: Option<Mutex<CacheStorage>>,
}

impl<C: AllocationApi> CachedAllocationClient<C> {
    /// Wrap `inner`, opening the default cache when `enabled`.
    pub fn new(inner: C, enabled: bool) -> Self {
        let storage = if enabled {
            match CacheStorage::open() {
                Ok(storage) => Some(storage),
                Err(e) => {
                    log::warn!("Response cache unavailable: {}", e);
                    None
                }
            }
        } else {
            None
        };
        Self::with_storage(inner, storage)
    }

    /// Wrap `inner` with explicit storage (or none)
    pub fn with_storage(inner: C, storage: Option<CacheStorage>) -> Self {
        Self {
            inner: Arc::new(inner),
            cache: storage.map(Mutex::new),
        }
    }

    #[cfg(test)]
    pub fn inner(&self) -> &C {
        &self.inner
    }

    fn get_cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let cache = self.cache.as_ref()?;
        let guard = cache.lock().ok()?;
        guard
            .get(key)
            .ok()
            .flatten()
            .and_then(|data| serde_json::from_slice(&data).ok())
    }

    fn set_cached<T: Serialize>(&self, key: &str, data: &T, time_period: &str, ttl: Duration) {
        if let Some(ref cache) = self.cache
            && let Ok(guard) = cache.lock()
            && let Ok(json) = serde_json::to_vec(data)
            && let Err(e) = guard.put(key, &json, self.inner.host(), time_period, ttl)
        {
            log::debug!("Failed to cache response: {}", e);
        }
    }
}

#[async_trait]
impl<C: AllocationApi + 'static> AllocationApi for CachedAllocationClient<C> {
    async fn list_instances(&self, time_period: &str) -> Result<Vec<Instance>> {
        let key = cache_key("list_instances", self.inner.host(), time_period);

        if let Some(cached) = self.get_cached(&key) {
            log::debug!("Cache hit: list_instances {}", time_period);
            return Ok(cached);
        }

        let result = self.inner.list_instances(time_period).await?;
        self.set_cached(&key, &result, time_period, CacheTtl::INSTANCES);
        Ok(result)
    }

    fn host(&self) -> &str {
        self.inner.host()
    }
}
