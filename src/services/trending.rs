//! Trending merge
//!
//! The catalog reports trending books in per-date buckets with heavy overlap
//! between days. This collapses them into one deduplicated list.

use std::collections::HashSet;

use crate::models::BookRecord;

/// Maximum number of books a trending response carries.
pub const TRENDING_LIMIT: usize = 7;

/// Flattens trend buckets into a single list.
///
/// Buckets are visited in order, records in bucket order; the first record
/// seen for an ISBN wins and later duplicates are dropped. The result is
/// truncated to `limit` records. Pure function of its inputs.
pub fn merge_trending(buckets: Vec<Vec<BookRecord>>, limit: usize) -> Vec<BookRecord> {
    let mut seen = HashSet::new();
    let mut merged = Vec::with_capacity(limit);

    for book in buckets.into_iter().flatten() {
        if merged.len() == limit {
            break;
        }
        if seen.insert(book.isbn.clone()) {
            merged.push(book);
        }
    }

    merged
}
