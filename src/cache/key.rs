//! Cache Key Module
//!
//! Builds one deterministic key per cacheable operation. A key encodes the
//! operation name plus every parameter that affects the upstream result,
//! serialized as JSON so distinct parameter sets can never collide. Auth
//! credentials are injected at the transport layer and never appear here.

use serde::Serialize;

use crate::error::CacheError;
use crate::models::SearchMode;

/// Joins an operation name with its JSON-encoded parameters.
fn build(operation: &str, params: &impl Serialize) -> Result<String, CacheError> {
    let encoded = serde_json::to_string(params)?;
    Ok(format!("{}:{}", operation, encoded))
}

// == Per-Operation Builders ==

#[derive(Serialize)]
struct SearchParams<'a> {
    mode: SearchMode,
    query: &'a str,
    page: u32,
}

/// Key for a book search. `query` must already be in its normalized form so
/// equivalent requests share an entry.
pub fn book_search(mode: SearchMode, query: &str, page_no: u32) -> Result<String, CacheError> {
    build(
        "books:search",
        &SearchParams {
            mode,
            query,
            page: page_no,
        },
    )
}

#[derive(Serialize)]
struct IsbnParams<'a> {
    isbn: &'a str,
}

/// Key for a single-book detail lookup.
pub fn book_detail(isbn: &str) -> Result<String, CacheError> {
    build("books:detail", &IsbnParams { isbn })
}

#[derive(Serialize)]
struct DateParams<'a> {
    date: &'a str,
}

/// Key for the trending list; the search date is part of the result.
pub fn trending(date: &str) -> Result<String, CacheError> {
    build("books:trending", &DateParams { date })
}

#[derive(Serialize)]
struct RangeParams<'a> {
    start: &'a str,
    end: &'a str,
}

/// Key for the popular-loans list over a date window.
pub fn popular_loans(start: &str, end: &str) -> Result<String, CacheError> {
    build("books:popular", &RangeParams { start, end })
}

#[derive(Serialize)]
struct HoldingsParams<'a> {
    isbn: &'a str,
    region: u32,
    detail_region: Option<u32>,
}

/// Key for the holdings lookup (libraries carrying a given book).
pub fn libraries_with_book(
    isbn: &str,
    region: u32,
    detail_region: Option<u32>,
) -> Result<String, CacheError> {
    build(
        "libraries:holdings",
        &HoldingsParams {
            isbn,
            region,
            detail_region,
        },
    )
}

#[derive(Serialize)]
struct RegionParams {
    region: u32,
    detail_region: Option<u32>,
}

/// Key for the regional library roster.
pub fn region_libraries(region: u32, detail_region: Option<u32>) -> Result<String, CacheError> {
    build(
        "libraries:region",
        &RegionParams {
            region,
            detail_region,
        },
    )
}
