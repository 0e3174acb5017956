//! API Routes
//!
//! Configures the Axum router with all gateway endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    book_detail_handler, combined_search_handler, feedback_handler, health_handler,
    libraries_by_isbn_handler, loan_status_handler, popular_handler, region_libraries_handler,
    search_books_handler, stats_handler, trending_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /books/search` - Paged catalog search (title, author, isbn)
/// - `GET /books/search/:isbn` - Single-book detail
/// - `GET /books/trending` - Today's trending books
/// - `GET /books/popularloanbooks` - Most-loaned books of the past month
/// - `GET /books/loanstatus` - Loan availability at one library
/// - `GET /search` - Combined title+author search
/// - `GET /libraries/searchbyregion` - Region roster
/// - `GET /libraries/searchbyisbn` - Region roster annotated with holdings
/// - `POST /feedback` - Forward user feedback to the notifier
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/books/search", get(search_books_handler))
        .route("/books/search/:isbn", get(book_detail_handler))
        .route("/books/trending", get(trending_handler))
        .route("/books/popularloanbooks", get(popular_handler))
        .route("/books/loanstatus", get(loan_status_handler))
        .route("/search", get(combined_search_handler))
        .route("/libraries/searchbyregion", get(region_libraries_handler))
        .route("/libraries/searchbyisbn", get(libraries_by_isbn_handler))
        .route("/feedback", post(feedback_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
