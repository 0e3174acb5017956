//! Upstream Module
//!
//! Everything about talking to the providers: the endpoint map, the
//! transport trait and its reqwest implementation, and the raw wire shapes
//! with their conversions into gateway models.

mod endpoint;
mod fetcher;

pub mod wire;

pub use endpoint::Endpoint;
pub use fetcher::{build_client, Fetcher, HttpFetcher};
