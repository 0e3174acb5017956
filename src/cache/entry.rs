//! Cache Entry Module
//!
//! The unit of storage inside `CacheStore`: one serialized JSON payload plus
//! the timestamps that bound its life. Every entry carries a deadline; there
//! is no such thing as a permanent entry in this gateway.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// One memoized upstream result.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Serialized JSON payload
    pub value: String,
    /// When the entry was written (Unix milliseconds)
    pub created_at: u64,
    /// When the entry stops being served (Unix milliseconds)
    pub expires_at: u64,
}

impl CacheEntry {
    /// Builds an entry whose deadline sits `ttl` past the current moment.
    pub fn new(value: String, ttl: Duration) -> Self {
        let now = current_timestamp_ms();
        Self {
            value,
            created_at: now,
            expires_at: now + ttl.as_millis() as u64,
        }
    }

    // == Expiry ==

    /// True once the deadline has been reached. The comparison is inclusive:
    /// an entry at exactly `expires_at` is already gone as far as readers are
    /// concerned.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }

    /// Milliseconds left before the deadline, saturating at zero. Feeds the
    /// trace line the store emits on hits.
    pub fn ttl_remaining_ms(&self) -> u64 {
        self.expires_at.saturating_sub(current_timestamp_ms())
    }
}

// == Clock ==
/// Current Unix time in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before Unix epoch")
        .as_millis() as u64
}
