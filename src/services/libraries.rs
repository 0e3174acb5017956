//! Libraries Service
//!
//! Library-facing operations: the roster of libraries in a region, and the
//! roster annotated with whether each library holds a given book. The
//! annotated view fans out to two catalog endpoints concurrently and joins
//! them on library code.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tracing::error;

use crate::cache::{key, RequestCache};
use crate::error::{FetchError, GatewayError, Result};
use crate::models::{AnnotatedLibrary, LibraryRecord};
use crate::notify::{Notifier, NotifyKind};
use crate::upstream::wire::LibrariesPayload;
use crate::upstream::{Endpoint, Fetcher};

/// Region rosters barely change; a day of staleness is fine.
const REGION_TTL: Duration = Duration::from_secs(24 * 60 * 60);
/// Holdings shift as libraries acquire books, so cache them shorter.
const HOLDINGS_TTL: Duration = Duration::from_secs(60 * 60);
/// Enough for the largest region's roster in one page.
const REGION_PAGE_SIZE: &str = "500";
const HOLDINGS_PAGE_SIZE: &str = "50";

// == Libraries Service ==
pub struct LibrariesService {
    fetcher: Arc<dyn Fetcher>,
    cache: RequestCache,
    notifier: Arc<dyn Notifier>,
}

impl LibrariesService {
    pub fn new(fetcher: Arc<dyn Fetcher>, cache: RequestCache, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            fetcher,
            cache,
            notifier,
        }
    }

    fn upstream_failure(&self, what: &str, err: &FetchError) -> GatewayError {
        error!(error = %err, "upstream failure");
        self.notifier
            .notify(NotifyKind::Error, &format!("can not get {}", what), &err.to_string());
        GatewayError::upstream(what)
    }

    // == Region Roster ==
    /// All libraries in a region (optionally narrowed to a district).
    pub async fn by_region(
        &self,
        region: u32,
        detail_region: Option<u32>,
    ) -> Result<Vec<LibraryRecord>> {
        let cache_key = key::region_libraries(region, detail_region);
        self.cache
            .get_or_fetch(cache_key, REGION_TTL, || {
                self.fetch_region(region, detail_region)
            })
            .await
    }

    async fn fetch_region(
        &self,
        region: u32,
        detail_region: Option<u32>,
    ) -> Result<Vec<LibraryRecord>> {
        let mut params = vec![
            ("region", region.to_string()),
            ("pageNo", "1".to_string()),
            ("pageSize", REGION_PAGE_SIZE.to_string()),
        ];
        if let Some(district) = detail_region {
            params.push(("dtl_region", district.to_string()));
        }

        let value = self
            .fetcher
            .fetch(Endpoint::LibrariesByRegion, &params)
            .await
            .map_err(|err| self.upstream_failure("libraries", &err))?;
        let payload: LibrariesPayload = serde_json::from_value(value).map_err(|err| {
            self.upstream_failure(
                "libraries",
                &FetchError::decode(Endpoint::LibrariesByRegion.name(), err),
            )
        })?;

        // A region without a roster means the catalog misbehaved, not an
        // empty region.
        let libs = payload.response.and_then(|body| body.libs).ok_or_else(|| {
            self.upstream_failure(
                "libraries",
                &FetchError::shape(Endpoint::LibrariesByRegion.name(), "libs"),
            )
        })?;

        Ok(libs.into_iter().map(|entry| entry.lib.into()).collect())
    }

    // == Holdings ==
    /// Libraries in the region that hold the given book. An absent list here
    /// is a real answer: nobody holds it.
    async fn holdings(
        &self,
        isbn: &str,
        region: u32,
        detail_region: Option<u32>,
    ) -> Result<Vec<LibraryRecord>> {
        let cache_key = key::libraries_with_book(isbn, region, detail_region);
        self.cache
            .get_or_fetch(cache_key, HOLDINGS_TTL, || {
                self.fetch_holdings(isbn, region, detail_region)
            })
            .await
    }

    async fn fetch_holdings(
        &self,
        isbn: &str,
        region: u32,
        detail_region: Option<u32>,
    ) -> Result<Vec<LibraryRecord>> {
        let mut params = vec![
            ("isbn", isbn.to_string()),
            ("region", region.to_string()),
            ("pageNo", "1".to_string()),
            ("pageSize", HOLDINGS_PAGE_SIZE.to_string()),
        ];
        if let Some(district) = detail_region {
            params.push(("dtl_region", district.to_string()));
        }

        let value = self
            .fetcher
            .fetch(Endpoint::LibrariesByBook, &params)
            .await
            .map_err(|err| self.upstream_failure("libraries", &err))?;
        let payload: LibrariesPayload = serde_json::from_value(value).map_err(|err| {
            self.upstream_failure(
                "libraries",
                &FetchError::decode(Endpoint::LibrariesByBook.name(), err),
            )
        })?;

        Ok(payload
            .response
            .and_then(|body| body.libs)
            .unwrap_or_default()
            .into_iter()
            .map(|entry| entry.lib.into())
            .collect())
    }

    // == Annotated Roster ==
    /// The region roster with each library flagged `Y`/`N` for holding the
    /// book. Roster order and size are preserved; only the flag is added.
    pub async fn find_by_isbn(
        &self,
        isbn: &str,
        region: u32,
        detail_region: Option<u32>,
    ) -> Result<Vec<AnnotatedLibrary>> {
        if !crate::util::is_isbn13(isbn) {
            return Err(GatewayError::validation("isbn must be a 13-digit number"));
        }

        let (roster, holding) = tokio::try_join!(
            self.by_region(region, detail_region),
            self.holdings(isbn, region, detail_region),
        )?;

        let holding_codes: HashSet<&str> =
            holding.iter().map(|library| library.lib_code.as_str()).collect();

        Ok(roster
            .into_iter()
            .map(|library| {
                let has_book = if holding_codes.contains(library.lib_code.as_str()) {
                    "Y"
                } else {
                    "N"
                };
                AnnotatedLibrary {
                    has_book: has_book.to_string(),
                    library,
                }
            })
            .collect())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::{json, Value};
    use tokio::sync::RwLock;

    use crate::cache::{CacheBackend, CacheStore, MemoryCache};
    use crate::notify::NoopNotifier;

    #[derive(Default)]
    struct StubFetcher {
        responses: HashMap<Endpoint, Value>,
        calls: Mutex<Vec<(Endpoint, Vec<(String, String)>)>>,
    }

    impl StubFetcher {
        fn with(mut self, endpoint: Endpoint, value: Value) -> Self {
            self.responses.insert(endpoint, value);
            self
        }

        fn calls_to(&self, endpoint: Endpoint) -> usize {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|(e, _)| *e == endpoint)
                .count()
        }

        fn last_params(&self, endpoint: Endpoint) -> Vec<(String, String)> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .rev()
                .find(|(e, _)| *e == endpoint)
                .map(|(_, params)| params.clone())
                .expect("endpoint was never called")
        }
    }

    #[async_trait]
    impl Fetcher for StubFetcher {
        async fn fetch(
            &self,
            endpoint: Endpoint,
            params: &[(&str, String)],
        ) -> std::result::Result<Value, FetchError> {
            let recorded = params
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect();
            self.calls.lock().unwrap().push((endpoint, recorded));

            self.responses
                .get(&endpoint)
                .cloned()
                .ok_or(FetchError::Status {
                    endpoint: endpoint.name(),
                    status: 500,
                    body: "unscripted".to_string(),
                })
        }
    }

    fn service(fetcher: Arc<StubFetcher>) -> LibrariesService {
        let store = Arc::new(RwLock::new(CacheStore::new(100, Duration::from_secs(300))));
        let backend: Arc<dyn CacheBackend> = Arc::new(MemoryCache::new(store));
        LibrariesService::new(fetcher, RequestCache::new(backend), Arc::new(NoopNotifier))
    }

    fn lib(code: &str, name: &str) -> Value {
        json!({"lib": {"libCode": code, "libName": name}})
    }

    fn roster(codes: &[(&str, &str)]) -> Value {
        let libs: Vec<Value> = codes.iter().map(|(code, name)| lib(code, name)).collect();
        json!({"response": {"libs": libs}})
    }

    #[tokio::test]
    async fn test_by_region_sends_roster_params() {
        let fetcher = Arc::new(
            StubFetcher::default()
                .with(Endpoint::LibrariesByRegion, roster(&[("111003", "서울도서관")])),
        );
        let service = service(fetcher.clone());

        let libraries = service.by_region(11, Some(11010)).await.unwrap();
        assert_eq!(libraries.len(), 1);
        assert_eq!(libraries[0].lib_name, "서울도서관");

        let params = fetcher.last_params(Endpoint::LibrariesByRegion);
        let get = |k: &str| params.iter().find(|(key, _)| key == k).map(|(_, v)| v.clone());
        assert_eq!(get("region").as_deref(), Some("11"));
        assert_eq!(get("dtl_region").as_deref(), Some("11010"));
        assert_eq!(get("pageNo").as_deref(), Some("1"));
        assert_eq!(get("pageSize").as_deref(), Some("500"));
    }

    #[tokio::test]
    async fn test_by_region_omits_absent_district() {
        let fetcher = Arc::new(
            StubFetcher::default().with(Endpoint::LibrariesByRegion, roster(&[("111003", "a")])),
        );
        let service = service(fetcher.clone());

        service.by_region(11, None).await.unwrap();

        let params = fetcher.last_params(Endpoint::LibrariesByRegion);
        assert!(!params.iter().any(|(key, _)| key == "dtl_region"));
    }

    #[tokio::test]
    async fn test_by_region_second_call_hits_cache() {
        let fetcher = Arc::new(
            StubFetcher::default().with(Endpoint::LibrariesByRegion, roster(&[("111003", "a")])),
        );
        let service = service(fetcher.clone());

        service.by_region(11, None).await.unwrap();
        service.by_region(11, None).await.unwrap();

        assert_eq!(fetcher.calls_to(Endpoint::LibrariesByRegion), 1);
    }

    #[tokio::test]
    async fn test_by_region_missing_roster_is_upstream_error() {
        let fetcher = Arc::new(
            StubFetcher::default().with(Endpoint::LibrariesByRegion, json!({"response": {}})),
        );
        let service = service(fetcher);

        let err = service.by_region(11, None).await.unwrap_err();
        assert_eq!(err.to_string(), "can not get libraries");
    }

    #[tokio::test]
    async fn test_find_by_isbn_annotates_roster_in_order() {
        let fetcher = Arc::new(
            StubFetcher::default()
                .with(
                    Endpoint::LibrariesByRegion,
                    roster(&[("101", "first"), ("102", "second"), ("103", "third")]),
                )
                .with(Endpoint::LibrariesByBook, roster(&[("102", "second")])),
        );
        let service = service(fetcher.clone());

        let annotated = service.find_by_isbn("9788966262281", 11, None).await.unwrap();

        let flags: Vec<(&str, &str)> = annotated
            .iter()
            .map(|a| (a.library.lib_code.as_str(), a.has_book.as_str()))
            .collect();
        assert_eq!(flags, vec![("101", "N"), ("102", "Y"), ("103", "N")]);

        let params = fetcher.last_params(Endpoint::LibrariesByBook);
        let get = |k: &str| params.iter().find(|(key, _)| key == k).map(|(_, v)| v.clone());
        assert_eq!(get("isbn").as_deref(), Some("9788966262281"));
        assert_eq!(get("pageSize").as_deref(), Some("50"));
    }

    #[tokio::test]
    async fn test_find_by_isbn_empty_holdings_flags_all_n() {
        let fetcher = Arc::new(
            StubFetcher::default()
                .with(Endpoint::LibrariesByRegion, roster(&[("101", "a"), ("102", "b")]))
                .with(Endpoint::LibrariesByBook, json!({"response": {}})),
        );
        let service = service(fetcher);

        let annotated = service.find_by_isbn("9788966262281", 11, None).await.unwrap();
        assert_eq!(annotated.len(), 2);
        assert!(annotated.iter().all(|a| a.has_book == "N"));
    }

    #[tokio::test]
    async fn test_find_by_isbn_fails_fast_when_roster_leg_fails() {
        // Roster unscripted: the whole join fails even though holdings is fine
        let fetcher = Arc::new(
            StubFetcher::default().with(Endpoint::LibrariesByBook, roster(&[("101", "a")])),
        );
        let service = service(fetcher);

        let err = service.find_by_isbn("9788966262281", 11, None).await.unwrap_err();
        assert_eq!(err.to_string(), "can not get libraries");
    }

    #[tokio::test]
    async fn test_find_by_isbn_rejects_bad_isbn() {
        let fetcher = Arc::new(StubFetcher::default());
        let service = service(fetcher.clone());

        let result = service.find_by_isbn("12345", 11, None).await;
        assert!(matches!(result, Err(GatewayError::Validation(_))));
        assert_eq!(fetcher.calls_to(Endpoint::LibrariesByRegion), 0);
        assert_eq!(fetcher.calls_to(Endpoint::LibrariesByBook), 0);
    }

    #[tokio::test]
    async fn test_legs_cached_independently() {
        let fetcher = Arc::new(
            StubFetcher::default()
                .with(Endpoint::LibrariesByRegion, roster(&[("101", "a")]))
                .with(Endpoint::LibrariesByBook, roster(&[("101", "a")])),
        );
        let service = service(fetcher.clone());

        service.find_by_isbn("9788966262281", 11, None).await.unwrap();
        // The roster leg is shared with the plain region lookup
        service.by_region(11, None).await.unwrap();

        assert_eq!(fetcher.calls_to(Endpoint::LibrariesByRegion), 1);
        assert_eq!(fetcher.calls_to(Endpoint::LibrariesByBook), 1);
    }
}
