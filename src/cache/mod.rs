//! Cache Module
//!
//! In-memory caching for upstream results: a bounded TTL/LRU store, the
//! backend trait in front of it, deterministic per-operation keys, and the
//! cache-aside wrapper the services go through.

mod aside;
mod backend;
mod entry;
mod lru;
mod stats;
mod store;

pub mod key;


// Re-export public types
pub use aside::RequestCache;
pub use backend::{CacheBackend, MemoryCache};
pub use entry::CacheEntry;
pub use lru::RecencyQueue;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed serialized value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB
