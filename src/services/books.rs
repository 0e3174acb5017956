//! Books Service
//!
//! Book-facing operations over the catalog: search in three modes, combined
//! title+author search, single-book detail with the fallback chain, the
//! trending list, popular loans, and loan status.
//!
//! Failure policy: validation problems go back to the caller as-is; upstream
//! problems are logged and notified in full detail while the caller gets the
//! generic message. The one exception is the detail chain, where a double
//! failure degrades to an empty record instead of an error.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, warn};

use crate::cache::{key, RequestCache};
use crate::error::{FetchError, GatewayError, Result};
use crate::models::{BookRecord, LoanStatus, SearchMode, SearchResult, PAGE_SIZE};
use crate::notify::{Notifier, NotifyKind};
use crate::services::trending::{merge_trending, TRENDING_LIMIT};
use crate::upstream::wire::{
    DetailPayload, FallbackItem, FallbackPayload, LoanPayload, SearchPayload, TrendPayload,
};
use crate::upstream::{Endpoint, Fetcher};

/// Popular-loans list changes slowly; cache it most of a day.
const POPULAR_TTL: Duration = Duration::from_secs(12 * 60 * 60);
/// Loan window for the popular list: one month back from today.
const POPULAR_WINDOW_MONTHS: u32 = 1;

// == Books Service ==
pub struct BooksService {
    fetcher: Arc<dyn Fetcher>,
    cache: RequestCache,
    notifier: Arc<dyn Notifier>,
    default_ttl: Duration,
}

impl BooksService {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        cache: RequestCache,
        notifier: Arc<dyn Notifier>,
        default_ttl: Duration,
    ) -> Self {
        Self {
            fetcher,
            cache,
            notifier,
            default_ttl,
        }
    }

    /// Logs and notifies the full upstream detail, returns the generic error.
    fn upstream_failure(&self, what: &str, err: &FetchError) -> GatewayError {
        error!(error = %err, "upstream failure");
        self.notifier
            .notify(NotifyKind::Error, &format!("can not get {}", what), &err.to_string());
        GatewayError::upstream(what)
    }

    // == Search ==
    /// Searches the catalog by title, author, or ISBN, one fixed-size page
    /// at a time. A catalog reply without matches is a zero-valued result,
    /// not an error.
    pub async fn search(
        &self,
        mode: SearchMode,
        query: &str,
        page_no: u32,
    ) -> Result<SearchResult> {
        if query.trim().is_empty() {
            return Err(GatewayError::validation("query must not be empty"));
        }
        if page_no < 1 {
            return Err(GatewayError::validation("pageNo must be at least 1"));
        }
        let term = match mode {
            SearchMode::Title => query.trim().to_string(),
            SearchMode::Author => crate::util::normalize_author(query),
            SearchMode::Isbn => {
                if !crate::util::is_isbn13(query) {
                    return Err(GatewayError::validation("isbn must be a 13-digit number"));
                }
                query.to_string()
            }
        };

        // Key built from the normalized term so equivalent queries share an entry
        let cache_key = key::book_search(mode, &term, page_no);
        self.cache
            .get_or_fetch(cache_key, self.default_ttl, || {
                self.fetch_search(mode, term, page_no)
            })
            .await
    }

    async fn fetch_search(
        &self,
        mode: SearchMode,
        term: String,
        page_no: u32,
    ) -> Result<SearchResult> {
        let params = [
            (mode.query_param(), term),
            ("pageNo", page_no.to_string()),
            ("pageSize", PAGE_SIZE.to_string()),
            ("sort", "pubYear".to_string()),
            ("order", "desc".to_string()),
            ("exactMatch", "true".to_string()),
        ];

        let value = self
            .fetcher
            .fetch(Endpoint::SearchBooks, &params)
            .await
            .map_err(|err| self.upstream_failure("books", &err))?;
        let payload: SearchPayload = serde_json::from_value(value).map_err(|err| {
            self.upstream_failure(
                "books",
                &FetchError::decode(Endpoint::SearchBooks.name(), err),
            )
        })?;

        let body = match payload.response {
            Some(body) => body,
            None => return Ok(SearchResult::empty()),
        };
        let docs = match body.docs {
            Some(docs) => docs,
            None => return Ok(SearchResult::empty()),
        };

        let books = docs.into_iter().map(|entry| entry.doc.into()).collect();
        Ok(SearchResult::paged(body.num_found, books))
    }

    // == Combined Search ==
    /// Runs the title and author searches concurrently and returns both
    /// pages. Either failure fails the pair.
    pub async fn search_both(
        &self,
        query: &str,
        page_no: u32,
    ) -> Result<(SearchResult, SearchResult)> {
        tokio::try_join!(
            self.search(SearchMode::Title, query, page_no),
            self.search(SearchMode::Author, query, page_no),
        )
    }

    // == Detail ==
    /// Looks up one book by ISBN: catalog first, then the fallback provider.
    ///
    /// `Ok(None)` means neither provider knows the book (or both were down);
    /// callers render it as an empty record. Only present results are cached.
    pub async fn detail(&self, isbn: &str) -> Result<Option<BookRecord>> {
        if !crate::util::is_isbn13(isbn) {
            return Err(GatewayError::validation("isbn must be a 13-digit number"));
        }

        let cache_key = key::book_detail(isbn);
        self.cache
            .get_or_fetch_optional(cache_key, self.default_ttl, || self.lookup_detail(isbn))
            .await
    }

    async fn lookup_detail(&self, isbn: &str) -> Result<Option<BookRecord>> {
        match self.catalog_detail(isbn).await {
            Ok(Some(record)) => Ok(Some(record)),
            Ok(None) => {
                debug!(isbn, "catalog has no detail record, trying fallback");
                Ok(self.fallback_detail(isbn).await)
            }
            Err(err) => {
                warn!(isbn, error = %err, "catalog detail failed, trying fallback");
                Ok(self.fallback_detail(isbn).await)
            }
        }
    }

    async fn catalog_detail(&self, isbn: &str) -> std::result::Result<Option<BookRecord>, FetchError> {
        let params = [
            ("isbn13", isbn.to_string()),
            ("loaninfoYN", "Y".to_string()),
            ("displayInfo", "age".to_string()),
        ];

        let value = self.fetcher.fetch(Endpoint::BookDetail, &params).await?;
        let payload: DetailPayload = serde_json::from_value(value)
            .map_err(|err| FetchError::decode(Endpoint::BookDetail.name(), err))?;

        Ok(payload
            .response
            .and_then(|body| body.detail)
            .and_then(|detail| detail.into_iter().next())
            .map(|entry| entry.book.into()))
    }

    /// Fallback lookup; exhausting it is not an error, just an absent record.
    async fn fallback_detail(&self, isbn: &str) -> Option<BookRecord> {
        let params = [("d_isbn", isbn.to_string())];

        let value = match self.fetcher.fetch(Endpoint::FallbackBookSearch, &params).await {
            Ok(value) => value,
            Err(err) => {
                warn!(isbn, error = %err, "fallback lookup failed, returning empty record");
                return None;
            }
        };

        match serde_json::from_value::<FallbackPayload>(value) {
            Ok(payload) => payload
                .items
                .into_iter()
                .next()
                .map(FallbackItem::into_record),
            Err(err) => {
                warn!(isbn, error = %err, "fallback payload undecodable");
                None
            }
        }
    }

    // == Trending ==
    /// Today's trending books: the catalog's per-date buckets merged into a
    /// single deduplicated list of at most [`TRENDING_LIMIT`] records.
    pub async fn trending(&self) -> Result<Vec<BookRecord>> {
        let date = crate::util::format_date(crate::util::today());
        let cache_key = key::trending(&date);
        self.cache
            .get_or_fetch(cache_key, self.default_ttl, || self.fetch_trending(date))
            .await
    }

    async fn fetch_trending(&self, date: String) -> Result<Vec<BookRecord>> {
        let params = [("searchDt", date)];

        let value = self
            .fetcher
            .fetch(Endpoint::HotTrend, &params)
            .await
            .map_err(|err| self.upstream_failure("trending books", &err))?;
        let payload: TrendPayload = serde_json::from_value(value).map_err(|err| {
            self.upstream_failure(
                "trending books",
                &FetchError::decode(Endpoint::HotTrend.name(), err),
            )
        })?;

        let results = payload
            .response
            .and_then(|body| body.results)
            .ok_or_else(|| {
                self.upstream_failure(
                    "trending books",
                    &FetchError::shape(Endpoint::HotTrend.name(), "results"),
                )
            })?;

        let buckets = results
            .into_iter()
            .map(|entry| {
                entry
                    .result
                    .docs
                    .into_iter()
                    .map(|doc| doc.doc.into())
                    .collect()
            })
            .collect();
        Ok(merge_trending(buckets, TRENDING_LIMIT))
    }

    // == Popular Loans ==
    /// The most-loaned books over the past month.
    pub async fn popular(&self) -> Result<Vec<BookRecord>> {
        let (start, end) = crate::util::month_range_back(POPULAR_WINDOW_MONTHS);
        let cache_key = key::popular_loans(&start, &end);
        self.cache
            .get_or_fetch(cache_key, POPULAR_TTL, || self.fetch_popular(start, end))
            .await
    }

    async fn fetch_popular(&self, start: String, end: String) -> Result<Vec<BookRecord>> {
        let params = [
            ("startDt", start),
            ("endDt", end),
            ("pageNo", "1".to_string()),
            ("pageSize", "10".to_string()),
        ];

        let value = self
            .fetcher
            .fetch(Endpoint::PopularLoans, &params)
            .await
            .map_err(|err| self.upstream_failure("popular loan books", &err))?;
        let payload: SearchPayload = serde_json::from_value(value).map_err(|err| {
            self.upstream_failure(
                "popular loan books",
                &FetchError::decode(Endpoint::PopularLoans.name(), err),
            )
        })?;

        let docs = payload.response.and_then(|body| body.docs).ok_or_else(|| {
            self.upstream_failure(
                "popular loan books",
                &FetchError::shape(Endpoint::PopularLoans.name(), "docs"),
            )
        })?;

        Ok(docs.into_iter().map(|entry| entry.doc.into()).collect())
    }

    // == Loan Status ==
    /// Availability of one book at one library. Never cached: availability
    /// flips with every checkout, so staleness here is worse than latency.
    pub async fn loan_status(&self, isbn: &str, lib_code: &str) -> Result<LoanStatus> {
        if !crate::util::is_isbn13(isbn) {
            return Err(GatewayError::validation("isbn must be a 13-digit number"));
        }
        if lib_code.is_empty() || !lib_code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(GatewayError::validation("libCode must be a number"));
        }

        let params = [
            ("isbn13", isbn.to_string()),
            ("libCode", lib_code.to_string()),
        ];

        let value = self
            .fetcher
            .fetch(Endpoint::LoanStatus, &params)
            .await
            .map_err(|err| self.upstream_failure("loan status", &err))?;
        let payload: LoanPayload = serde_json::from_value(value).map_err(|err| {
            self.upstream_failure(
                "loan status",
                &FetchError::decode(Endpoint::LoanStatus.name(), err),
            )
        })?;

        payload.response.and_then(|body| body.result).ok_or_else(|| {
            self.upstream_failure(
                "loan status",
                &FetchError::shape(Endpoint::LoanStatus.name(), "result"),
            )
        })
    }
}
