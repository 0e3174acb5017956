//! Upstream Fetcher Module
//!
//! The transport seam for all outbound calls. Services depend on the
//! `Fetcher` trait; `HttpFetcher` is the real implementation carrying the
//! shared reqwest client and the credentials for both providers. Credentials
//! are injected here and only here, so they can never leak into cache keys.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::FetchError;
use crate::upstream::Endpoint;

/// Upper bound on upstream error text carried into our own errors.
const MAX_ERROR_BODY: usize = 300;

/// Cuts an error body down to the size bound without splitting a character.
fn truncate_body(mut body: String) -> String {
    if body.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
    }
    body
}

// == Fetcher Trait ==
/// Capability to perform one upstream request and return its JSON payload.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Issues the request for `endpoint` with the given query parameters.
    ///
    /// Implementations add transport-level parameters (auth, response
    /// format) themselves; callers pass only result-affecting parameters.
    async fn fetch(
        &self,
        endpoint: Endpoint,
        params: &[(&str, String)],
    ) -> Result<Value, FetchError>;
}

// == Client Construction ==
/// Builds the shared HTTP client: per-request timeout, bounded redirects.
pub fn build_client(config: &Config) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.upstream_timeout))
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
}

// == Http Fetcher ==
/// Production fetcher over the catalog and the fallback provider.
pub struct HttpFetcher {
    client: reqwest::Client,
    catalog_base_url: String,
    catalog_api_key: String,
    fallback_url: String,
    fallback_client_id: String,
    fallback_client_secret: String,
}

impl HttpFetcher {
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            catalog_base_url: config.catalog_base_url.clone(),
            catalog_api_key: config.catalog_api_key.clone(),
            fallback_url: config.fallback_url.clone(),
            fallback_client_id: config.fallback_client_id.clone(),
            fallback_client_secret: config.fallback_client_secret.clone(),
        }
    }

    fn endpoint_url(&self, endpoint: Endpoint) -> String {
        if endpoint.is_fallback() {
            self.fallback_url.clone()
        } else {
            format!("{}{}", self.catalog_base_url, endpoint.path())
        }
    }
}

// Credentials stay out of log output
impl fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpFetcher")
            .field("catalog_base_url", &self.catalog_base_url)
            .field("catalog_api_key", &"<redacted>")
            .field("fallback_url", &self.fallback_url)
            .field("fallback_client_id", &"<redacted>")
            .field("fallback_client_secret", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(
        &self,
        endpoint: Endpoint,
        params: &[(&str, String)],
    ) -> Result<Value, FetchError> {
        let name = endpoint.name();
        let url = self.endpoint_url(endpoint);
        debug!(endpoint = name, "upstream request");

        let mut request = self.client.get(&url).query(params);
        if endpoint.is_fallback() {
            request = request
                .header("X-Naver-Client-Id", &self.fallback_client_id)
                .header("X-Naver-Client-Secret", &self.fallback_client_secret);
        } else {
            request = request.query(&[
                ("authKey", self.catalog_api_key.as_str()),
                ("format", "json"),
            ]);
        }

        let response = request.send().await.map_err(|source| FetchError::Transport {
            endpoint: name,
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                endpoint: name,
                status: status.as_u16(),
                body: truncate_body(body),
            });
        }

        let value: Value = response.json().await.map_err(|err| FetchError::Decode {
            endpoint: name,
            detail: err.to_string(),
        })?;

        // The catalog reports failures inside a 200 body
        if let Some(message) = value
            .get("response")
            .and_then(|response| response.get("error"))
            .and_then(Value::as_str)
        {
            return Err(FetchError::Api {
                endpoint: name,
                message: message.to_string(),
            });
        }

        Ok(value)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher() -> HttpFetcher {
        let config = Config {
            catalog_base_url: "http://catalog.test/api".to_string(),
            catalog_api_key: "secret-key".to_string(),
            fallback_url: "https://fallback.test/search".to_string(),
            fallback_client_id: "client-id".to_string(),
            fallback_client_secret: "client-secret".to_string(),
            ..Config::default()
        };
        HttpFetcher::new(build_client(&config).unwrap(), &config)
    }

    #[test]
    fn test_catalog_urls_append_endpoint_path() {
        let fetcher = fetcher();
        assert_eq!(
            fetcher.endpoint_url(Endpoint::SearchBooks),
            "http://catalog.test/api/srchBooks"
        );
        assert_eq!(
            fetcher.endpoint_url(Endpoint::LibrariesByBook),
            "http://catalog.test/api/libSrchByBook"
        );
    }

    #[test]
    fn test_fallback_url_used_verbatim() {
        let fetcher = fetcher();
        assert_eq!(
            fetcher.endpoint_url(Endpoint::FallbackBookSearch),
            "https://fallback.test/search"
        );
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let output = format!("{:?}", fetcher());
        assert!(!output.contains("secret-key"));
        assert!(!output.contains("client-secret"));
        assert!(output.contains("<redacted>"));
        assert!(output.contains("catalog.test"));
    }

    #[test]
    fn test_truncate_body_respects_char_boundaries() {
        // Multibyte text whose byte limit lands mid-character
        let long = "오류".repeat(100);
        let cut = truncate_body(long.clone());
        assert!(cut.len() <= MAX_ERROR_BODY);
        assert!(long.starts_with(&cut));

        let short = "maintenance".to_string();
        assert_eq!(truncate_body(short.clone()), short);
    }
}
