//! Cache Store Module
//!
//! Bounded TTL map combining HashMap storage with LRU tracking. Holds
//! serialized upstream results keyed by operation; entries are only ever
//! written by the cache-aside wrapper, never by API callers.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::{CacheEntry, CacheStats, RecencyQueue, MAX_KEY_LENGTH, MAX_VALUE_SIZE};
use crate::error::CacheError;

// == Cache Store ==
/// Main cache storage with LRU eviction and TTL expiry.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Access order for eviction
    recency: RecencyQueue,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// TTL applied when the caller does not supply one
    default_ttl: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore with the given capacity and default TTL.
    pub fn new(max_entries: usize, default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            recency: RecencyQueue::new(),
            stats: CacheStats::new(),
            max_entries,
            default_ttl,
        }
    }

    // == Set ==
    /// Stores a serialized payload under a key.
    ///
    /// Overwriting an existing key resets its TTL. At capacity the least
    /// recently used entry is evicted first.
    ///
    /// # Arguments
    /// * `key` - The cache key
    /// * `value` - Serialized JSON payload
    /// * `ttl` - Entry TTL; the store default applies when `None`
    pub fn set(
        &mut self,
        key: String,
        value: String,
        ttl: Option<Duration>,
    ) -> Result<(), CacheError> {
        if key.len() > MAX_KEY_LENGTH {
            return Err(CacheError::KeyTooLong(MAX_KEY_LENGTH));
        }
        if value.len() > MAX_VALUE_SIZE {
            return Err(CacheError::ValueTooLarge(MAX_VALUE_SIZE));
        }

        let is_overwrite = self.entries.contains_key(&key);

        // At capacity, make room before inserting a new key
        if !is_overwrite && self.entries.len() >= self.max_entries {
            if let Some(evicted_key) = self.recency.pop_stalest() {
                self.entries.remove(&evicted_key);
                self.stats.record_eviction();
            }
        }

        let entry = CacheEntry::new(value, ttl.unwrap_or(self.default_ttl));
        self.entries.insert(key.clone(), entry);
        self.recency.touch(&key);
        self.stats.set_total_entries(self.entries.len());

        Ok(())
    }

    // == Get ==
    /// Retrieves a payload by key.
    ///
    /// An expired entry reads as absent: it is removed inline and counted as
    /// both an expiry and a miss. Live hits refresh the key's LRU position.
    pub fn get(&mut self, key: &str) -> Option<String> {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                self.entries.remove(key);
                self.recency.forget(key);
                self.stats.record_expired();
                self.stats.record_miss();
                self.stats.set_total_entries(self.entries.len());
                None
            }
            Some(entry) => {
                let value = entry.value.clone();
                tracing::trace!(key, remaining_ms = entry.ttl_remaining_ms(), "cache hit");
                self.stats.record_hit();
                self.recency.touch(key);
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Stats ==
    /// Returns a snapshot of the current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Sweep Expired ==
    /// Removes all expired entries. Returns the number removed.
    ///
    /// Called by the background sweep task; reads already remove expired
    /// entries on contact, this reclaims the ones nobody asked for again.
    pub fn sweep_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.entries.remove(&key);
            self.recency.forget(&key);
            self.stats.record_expired();
        }

        self.stats.set_total_entries(self.entries.len());
        count
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
