//! Configuration Module
//!
//! Handles loading and managing gateway configuration from environment variables.

use std::env;

/// Gateway configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
/// Credentials default to empty strings; without them the catalog rejects
/// requests, which surfaces through the normal upstream error path.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Default TTL in seconds for cached operations without a dedicated TTL
    pub default_ttl: u64,
    /// Background expiry sweep interval in seconds
    pub cleanup_interval: u64,
    /// Per-request timeout for upstream calls, in seconds
    pub upstream_timeout: u64,
    /// Base URL of the library catalog API
    pub catalog_base_url: String,
    /// Auth key sent with every catalog request
    pub catalog_api_key: String,
    /// Full URL of the fallback book-search provider
    pub fallback_url: String,
    /// Client id header value for the fallback provider
    pub fallback_client_id: String,
    /// Client secret header value for the fallback provider
    pub fallback_client_secret: String,
    /// Discord webhook for notifications; notifications are disabled when unset
    pub discord_webhook_url: Option<String>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 10000)
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 1800)
    /// - `CLEANUP_INTERVAL` - Expiry sweep frequency in seconds (default: 60)
    /// - `UPSTREAM_TIMEOUT` - Upstream request timeout in seconds (default: 10)
    /// - `CATALOG_BASE_URL` - Catalog API base (default: data4library)
    /// - `CATALOG_API_KEY` - Catalog auth key
    /// - `FALLBACK_URL` - Fallback book-search endpoint
    /// - `FALLBACK_CLIENT_ID` / `FALLBACK_CLIENT_SECRET` - Fallback credentials
    /// - `DISCORD_WEBHOOK_URL` - Webhook for notifications (optional)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            max_entries: env::var("MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_entries),
            default_ttl: env::var("DEFAULT_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_ttl),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cleanup_interval),
            upstream_timeout: env::var("UPSTREAM_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.upstream_timeout),
            catalog_base_url: env::var("CATALOG_BASE_URL").unwrap_or(defaults.catalog_base_url),
            catalog_api_key: env::var("CATALOG_API_KEY").unwrap_or(defaults.catalog_api_key),
            fallback_url: env::var("FALLBACK_URL").unwrap_or(defaults.fallback_url),
            fallback_client_id: env::var("FALLBACK_CLIENT_ID")
                .unwrap_or(defaults.fallback_client_id),
            fallback_client_secret: env::var("FALLBACK_CLIENT_SECRET")
                .unwrap_or(defaults.fallback_client_secret),
            discord_webhook_url: env::var("DISCORD_WEBHOOK_URL").ok(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            max_entries: 10_000,
            default_ttl: 1800,
            cleanup_interval: 60,
            upstream_timeout: 10,
            catalog_base_url: "http://data4library.kr/api".to_string(),
            catalog_api_key: String::new(),
            fallback_url: "https://openapi.naver.com/v1/search/book_adv.json".to_string(),
            fallback_client_id: String::new(),
            fallback_client_secret: String::new(),
            discord_webhook_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.max_entries, 10_000);
        assert_eq!(config.default_ttl, 1800);
        assert_eq!(config.cleanup_interval, 60);
        assert_eq!(config.upstream_timeout, 10);
        assert!(config.catalog_base_url.contains("data4library"));
        assert!(config.discord_webhook_url.is_none());
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("SERVER_PORT");
        env::remove_var("MAX_ENTRIES");
        env::remove_var("DEFAULT_TTL");
        env::remove_var("CLEANUP_INTERVAL");
        env::remove_var("UPSTREAM_TIMEOUT");
        env::remove_var("CATALOG_BASE_URL");
        env::remove_var("DISCORD_WEBHOOK_URL");

        let config = Config::from_env();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.max_entries, 10_000);
        assert_eq!(config.default_ttl, 1800);
        assert_eq!(config.cleanup_interval, 60);
        assert!(config.discord_webhook_url.is_none());
    }
}
