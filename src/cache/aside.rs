//! Cache-Aside Wrapper Module
//!
//! Memoizes upstream operations through an injected backend. The cache is
//! strictly advisory: a broken key builder or a failing backend degrades the
//! gateway to pass-through, it never fails a request. Fetch errors propagate
//! untouched and are never cached.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::CacheBackend;
use crate::error::{CacheError, GatewayError};

// == Request Cache ==
/// Cache-aside front for upstream operations.
///
/// Each call performs at most one backend read and one backend write. There
/// is no request coalescing: concurrent misses on the same key each fetch,
/// and the last write wins.
#[derive(Clone)]
pub struct RequestCache {
    backend: Arc<dyn CacheBackend>,
}

impl RequestCache {
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self { backend }
    }

    // == Get Or Fetch ==
    /// Returns the cached value for `key`, fetching and caching on a miss.
    ///
    /// Every successful fetch result is cached, including empty ones; use
    /// [`get_or_fetch_optional`](Self::get_or_fetch_optional) for operations
    /// whose absent results must stay uncached.
    pub async fn get_or_fetch<T, F, Fut>(
        &self,
        key: Result<String, CacheError>,
        ttl: Duration,
        fetch: F,
    ) -> Result<T, GatewayError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, GatewayError>>,
    {
        let key = match key {
            Ok(key) => key,
            Err(err) => {
                // Without a key the cache cannot participate; serve uncached
                warn!(error = %err, "cache key unavailable, serving uncached");
                return fetch().await;
            }
        };

        if let Some(value) = self.read(&key).await {
            return Ok(value);
        }

        let value = fetch().await?;
        self.write(&key, &value, ttl).await;
        Ok(value)
    }

    // == Get Or Fetch Optional ==
    /// Like [`get_or_fetch`](Self::get_or_fetch), but only present results
    /// are cached; `Ok(None)` passes through uncached so a later call may
    /// find the record once upstream recovers.
    pub async fn get_or_fetch_optional<T, F, Fut>(
        &self,
        key: Result<String, CacheError>,
        ttl: Duration,
        fetch: F,
    ) -> Result<Option<T>, GatewayError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<T>, GatewayError>>,
    {
        let key = match key {
            Ok(key) => key,
            Err(err) => {
                warn!(error = %err, "cache key unavailable, serving uncached");
                return fetch().await;
            }
        };

        if let Some(value) = self.read(&key).await {
            return Ok(Some(value));
        }

        match fetch().await? {
            Some(value) => {
                self.write(&key, &value, ttl).await;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Backend read with fail-open semantics: backend errors and undecodable
    /// payloads both count as a miss.
    async fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let payload = match self.backend.get(key).await {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                debug!(key, "cache miss");
                return None;
            }
            Err(err) => {
                warn!(key, error = %err, "cache read failed, treating as miss");
                return None;
            }
        };

        match serde_json::from_str(&payload) {
            Ok(value) => {
                debug!(key, "cache hit");
                Some(value)
            }
            Err(err) => {
                warn!(key, error = %err, "cached payload undecodable, treating as miss");
                None
            }
        }
    }

    /// Best-effort backend write; failures are logged and swallowed.
    async fn write<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) {
        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(key, error = %err, "could not encode value for cache");
                return;
            }
        };

        if let Err(err) = self.backend.set(key, payload, ttl).await {
            warn!(key, error = %err, "cache write failed");
        }
    }
}
