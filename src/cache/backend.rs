//! Cache Backend Module
//!
//! Trait seam between the cache-aside wrapper and the storage it writes
//! through. The gateway ships an in-memory backend; the trait keeps the
//! wrapper indifferent to where entries actually live.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::CacheStore;
use crate::error::CacheError;

// == Cache Backend Trait ==
/// Storage capability used by the cache-aside wrapper.
///
/// `get` distinguishes "no usable entry" (`Ok(None)`) from backend failure
/// (`Err`); the wrapper treats both as a miss but logs the latter.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Looks up a serialized payload. Expired entries read as absent.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Stores a serialized payload with the given TTL.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError>;
}

// == Memory Cache ==
/// In-process backend over the LRU/TTL store.
#[derive(Clone)]
pub struct MemoryCache {
    store: Arc<RwLock<CacheStore>>,
}

impl MemoryCache {
    pub fn new(store: Arc<RwLock<CacheStore>>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CacheBackend for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        // Write lock: reads update LRU order and stats
        let mut store = self.store.write().await;
        Ok(store.get(key))
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        let mut store = self.store.write().await;
        store.set(key.to_string(), value, Some(ttl))
    }
}
