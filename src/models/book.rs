//! Book domain models
//!
//! The stable shapes the gateway returns regardless of which upstream (or
//! which fallback) produced them. Serialized field names follow the public
//! API contract, which predates this service.

use serde::{Deserialize, Serialize};

/// Number of records per search page, fixed by the catalog query we issue.
pub const PAGE_SIZE: u64 = 12;

// == Search Mode ==
/// Which catalog field a book search matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Title,
    Author,
    Isbn,
}

impl SearchMode {
    /// The catalog query parameter carrying the search term for this mode.
    pub fn query_param(&self) -> &'static str {
        match self {
            SearchMode::Title => "title",
            SearchMode::Author => "author",
            SearchMode::Isbn => "isbn13",
        }
    }
}

// == Book Record ==
/// A single book as the gateway presents it. Identity is the 13-digit ISBN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub bookname: String,
    pub authors: String,
    pub publisher: String,
    #[serde(rename = "publicationYear")]
    pub publication_year: String,
    pub isbn: String,
    pub vol: String,
    #[serde(rename = "bookImageURL")]
    pub book_image_url: String,
}

// == Search Result ==
/// One page of search results plus the paging arithmetic callers rely on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub pages: u64,
    pub books: Vec<BookRecord>,
    #[serde(rename = "numFound")]
    pub num_found: u64,
}

impl SearchResult {
    /// The zero-valued result used when the catalog returns nothing at all.
    pub fn empty() -> Self {
        Self {
            pages: 0,
            books: Vec::new(),
            num_found: 0,
        }
    }

    /// Builds a result page, deriving the page count from the total match
    /// count at `PAGE_SIZE` records per page.
    pub fn paged(num_found: u64, books: Vec<BookRecord>) -> Self {
        Self {
            pages: (num_found + PAGE_SIZE - 1) / PAGE_SIZE,
            books,
            num_found,
        }
    }
}

// == Loan Status ==
/// Availability of one book at one library, passed through from the catalog
/// ("Y"/"N" flags, same as upstream).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanStatus {
    #[serde(rename = "hasBook")]
    pub has_book: String,
    #[serde(rename = "loanAvailable")]
    pub loan_available: String,
}
