//! API Handlers
//!
//! HTTP request handlers for each gateway endpoint. Handlers stay thin:
//! validate the query or body, call the service, wrap the answer in Json.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use crate::cache::{CacheBackend, CacheStore, MemoryCache, RequestCache};
use crate::config::Config;
use crate::error::{GatewayError, Result};
use crate::models::{
    AnnotatedLibrary, BookRecord, BookSearchQuery, CombinedSearchQuery, FeedbackRequest,
    FeedbackResponse, HealthResponse, LibraryRecord, LibrarySearchQuery, LoanStatus,
    LoanStatusQuery, RegionQuery, SearchResult, StatsResponse,
};
use crate::notify::{Notifier, NotifyKind};
use crate::services::{BooksService, LibrariesService};
use crate::upstream::Fetcher;

/// Application state shared across all handlers.
///
/// Both services share one cache store through the same backend; the raw
/// store handle stays around for the stats endpoint and the expiry sweeper.
#[derive(Clone)]
pub struct AppState {
    pub books: Arc<BooksService>,
    pub libraries: Arc<LibrariesService>,
    pub notifier: Arc<dyn Notifier>,
    pub cache: Arc<RwLock<CacheStore>>,
}

impl AppState {
    /// Wires the services over the given fetcher and notifier.
    pub fn new(fetcher: Arc<dyn Fetcher>, notifier: Arc<dyn Notifier>, config: &Config) -> Self {
        let default_ttl = Duration::from_secs(config.default_ttl);
        let store = Arc::new(RwLock::new(CacheStore::new(config.max_entries, default_ttl)));
        let backend: Arc<dyn CacheBackend> = Arc::new(MemoryCache::new(store.clone()));
        let cache = RequestCache::new(backend);

        Self {
            books: Arc::new(BooksService::new(
                fetcher.clone(),
                cache.clone(),
                notifier.clone(),
                default_ttl,
            )),
            libraries: Arc::new(LibrariesService::new(fetcher, cache, notifier.clone())),
            notifier,
            cache: store,
        }
    }
}

// == Book Handlers ==

/// Handler for GET /books/search
///
/// One page of catalog results in the requested mode (title, author, isbn).
pub async fn search_books_handler(
    State(state): State<AppState>,
    Query(query): Query<BookSearchQuery>,
) -> Result<Json<SearchResult>> {
    if let Some(message) = query.validate() {
        return Err(GatewayError::validation(message));
    }

    let result = state
        .books
        .search(query.mode, &query.query, query.page_no)
        .await?;
    Ok(Json(result))
}

/// Handler for GET /books/search/:isbn
///
/// Single-book detail. An unknown book answers `{}` rather than an error.
pub async fn book_detail_handler(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<Json<Value>> {
    let record = state.books.detail(&isbn).await?;

    let body = match record {
        Some(record) => serde_json::to_value(record).map_err(GatewayError::internal)?,
        None => json!({}),
    };
    Ok(Json(body))
}

/// Handler for GET /books/trending
pub async fn trending_handler(State(state): State<AppState>) -> Result<Json<Vec<BookRecord>>> {
    let books = state.books.trending().await?;
    Ok(Json(books))
}

/// Handler for GET /books/popularloanbooks
pub async fn popular_handler(State(state): State<AppState>) -> Result<Json<Vec<BookRecord>>> {
    let books = state.books.popular().await?;
    Ok(Json(books))
}

/// Handler for GET /books/loanstatus
pub async fn loan_status_handler(
    State(state): State<AppState>,
    Query(query): Query<LoanStatusQuery>,
) -> Result<Json<LoanStatus>> {
    let status = state
        .books
        .loan_status(&query.isbn, &query.lib_code)
        .await?;
    Ok(Json(status))
}

// == Combined Search Handler ==

/// Handler for GET /search
///
/// Title and author results for the same query, as a two-element array.
pub async fn combined_search_handler(
    State(state): State<AppState>,
    Query(query): Query<CombinedSearchQuery>,
) -> Result<Json<(SearchResult, SearchResult)>> {
    if let Some(message) = query.validate() {
        return Err(GatewayError::validation(message));
    }

    let results = state
        .books
        .search_both(&query.query, query.page_no)
        .await?;
    Ok(Json(results))
}

// == Library Handlers ==

/// Handler for GET /libraries/searchbyregion
pub async fn region_libraries_handler(
    State(state): State<AppState>,
    Query(query): Query<RegionQuery>,
) -> Result<Json<Vec<LibraryRecord>>> {
    let libraries = state
        .libraries
        .by_region(query.region, query.dtl_region)
        .await?;
    Ok(Json(libraries))
}

/// Handler for GET /libraries/searchbyisbn
pub async fn libraries_by_isbn_handler(
    State(state): State<AppState>,
    Query(query): Query<LibrarySearchQuery>,
) -> Result<Json<Vec<AnnotatedLibrary>>> {
    let libraries = state
        .libraries
        .find_by_isbn(&query.isbn, query.region, query.dtl_region)
        .await?;
    Ok(Json(libraries))
}

// == Feedback Handler ==

/// Handler for POST /feedback
///
/// Forwards user feedback to the notifier; delivery is fire-and-forget, so
/// acceptance only means the message passed validation.
pub async fn feedback_handler(
    State(state): State<AppState>,
    Json(req): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>> {
    if let Some(message) = req.validate() {
        return Err(GatewayError::validation(message));
    }

    state.notifier.notify_with_contact(
        NotifyKind::Feedback,
        &req.title,
        &req.description,
        req.email.as_deref(),
    );
    Ok(Json(FeedbackResponse::accepted()))
}

// == Operational Handlers ==

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    Json(StatsResponse::new(&cache.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::error::FetchError;
    use crate::models::SearchMode;
    use crate::notify::NoopNotifier;
    use crate::upstream::Endpoint;

    /// Every upstream call fails; good enough for handlers whose paths never
    /// reach upstream, and for the degrade-to-empty detail path.
    struct DownFetcher;

    #[async_trait]
    impl Fetcher for DownFetcher {
        async fn fetch(
            &self,
            endpoint: Endpoint,
            _params: &[(&str, String)],
        ) -> std::result::Result<Value, FetchError> {
            Err(FetchError::Status {
                endpoint: endpoint.name(),
                status: 503,
                body: "down".to_string(),
            })
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        events: Mutex<Vec<(NotifyKind, String, Option<String>)>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify_with_contact(
            &self,
            kind: NotifyKind,
            title: &str,
            _detail: &str,
            contact: Option<&str>,
        ) {
            self.events.lock().unwrap().push((
                kind,
                title.to_string(),
                contact.map(|c| c.to_string()),
            ));
        }
    }

    fn state_with(notifier: Arc<dyn Notifier>) -> AppState {
        AppState::new(Arc::new(DownFetcher), notifier, &Config::default())
    }

    #[tokio::test]
    async fn test_search_handler_rejects_invalid_query() {
        let state = state_with(Arc::new(NoopNotifier));
        let query = BookSearchQuery {
            mode: SearchMode::Title,
            query: "   ".to_string(),
            page_no: 1,
        };

        let result = search_books_handler(State(state), Query(query)).await;
        assert!(matches!(result, Err(GatewayError::Validation(_))));
    }

    #[tokio::test]
    async fn test_detail_handler_renders_absent_book_as_empty_object() {
        let state = state_with(Arc::new(NoopNotifier));

        let response = book_detail_handler(State(state), Path("9788966262281".to_string()))
            .await
            .unwrap();
        assert_eq!(response.0, json!({}));
    }

    #[tokio::test]
    async fn test_feedback_handler_notifies_with_contact() {
        let notifier = Arc::new(RecordingNotifier::default());
        let state = state_with(notifier.clone());

        let req = FeedbackRequest {
            title: "search is slow".to_string(),
            description: "author search takes seconds".to_string(),
            email: Some("reader@example.com".to_string()),
        };
        let response = feedback_handler(State(state), Json(req)).await.unwrap();
        assert_eq!(response.0.message, "feedback received");

        let events = notifier.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, NotifyKind::Feedback);
        assert_eq!(events[0].1, "search is slow");
        assert_eq!(events[0].2.as_deref(), Some("reader@example.com"));
    }

    #[tokio::test]
    async fn test_feedback_handler_rejects_invalid_body() {
        let notifier = Arc::new(RecordingNotifier::default());
        let state = state_with(notifier.clone());

        let req = FeedbackRequest {
            title: String::new(),
            description: "no title".to_string(),
            email: None,
        };
        let result = feedback_handler(State(state), Json(req)).await;
        assert!(matches!(result, Err(GatewayError::Validation(_))));
        assert!(notifier.events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stats_handler_starts_at_zero() {
        let state = state_with(Arc::new(NoopNotifier));

        let response = stats_handler(State(state)).await;
        assert_eq!(response.0.hits, 0);
        assert_eq!(response.0.misses, 0);
        assert_eq!(response.0.total_entries, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.0.status, "healthy");
    }
}
