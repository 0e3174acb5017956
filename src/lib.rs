//! Bibliogate - a caching aggregation gateway for public-library open data
//!
//! Fronts the national library catalog (and a commercial fallback for book
//! lookups) with one HTTP API: search, book detail, trending and popular
//! lists, library rosters, and loan availability, memoized in an in-process
//! TTL+LRU cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod services;
pub mod tasks;
pub mod upstream;
pub mod util;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
