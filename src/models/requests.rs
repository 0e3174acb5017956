//! Request DTOs for the gateway API
//!
//! Query and body shapes for incoming requests. Structural checks live here
//! in `validate()` methods; identifier checks (ISBN digits, region codes)
//! are enforced by the services so every entry point shares them.

use serde::Deserialize;

use crate::models::SearchMode;

fn default_page() -> u32 {
    1
}

// == Book Search Query ==
/// Query string for `GET /books/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct BookSearchQuery {
    /// Which field to match: title, author, or isbn
    pub mode: SearchMode,
    /// The search term
    pub query: String,
    /// 1-based page number
    #[serde(rename = "pageNo", default = "default_page")]
    pub page_no: u32,
}

impl BookSearchQuery {
    /// Returns an error message if the query is structurally invalid.
    pub fn validate(&self) -> Option<String> {
        if self.query.trim().is_empty() {
            return Some("query must not be empty".to_string());
        }
        if self.page_no < 1 {
            return Some("pageNo must be at least 1".to_string());
        }
        None
    }
}

// == Combined Search Query ==
/// Query string for `GET /search` (title and author searched together).
#[derive(Debug, Clone, Deserialize)]
pub struct CombinedSearchQuery {
    pub query: String,
    #[serde(rename = "pageNo", default = "default_page")]
    pub page_no: u32,
}

impl CombinedSearchQuery {
    pub fn validate(&self) -> Option<String> {
        if self.query.trim().is_empty() {
            return Some("query must not be empty".to_string());
        }
        if self.page_no < 1 {
            return Some("pageNo must be at least 1".to_string());
        }
        None
    }
}

// == Loan Status Query ==
/// Query string for `GET /books/loanstatus`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoanStatusQuery {
    pub isbn: String,
    #[serde(rename = "libCode")]
    pub lib_code: String,
}

// == Region Query ==
/// Query string for `GET /libraries/searchbyregion`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionQuery {
    /// Province-level region code
    pub region: u32,
    /// Optional district code within the region
    #[serde(rename = "dtlRegion")]
    pub dtl_region: Option<u32>,
}

// == Library Search Query ==
/// Query string for `GET /libraries/searchbyisbn`.
#[derive(Debug, Clone, Deserialize)]
pub struct LibrarySearchQuery {
    pub isbn: String,
    pub region: u32,
    #[serde(rename = "dtlRegion")]
    pub dtl_region: Option<u32>,
}

// == Feedback Request ==
/// Body for `POST /feedback`, relayed to the notifier.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackRequest {
    pub title: String,
    pub description: String,
    /// Optional contact address shown in the notification footer
    #[serde(default)]
    pub email: Option<String>,
}

impl FeedbackRequest {
    pub fn validate(&self) -> Option<String> {
        if self.title.trim().is_empty() {
            return Some("title must not be empty".to_string());
        }
        if self.title.chars().count() > 100 {
            return Some("title must be at most 100 characters".to_string());
        }
        if self.description.trim().is_empty() {
            return Some("description must not be empty".to_string());
        }
        if self.description.chars().count() > 300 {
            return Some("description must be at most 300 characters".to_string());
        }
        if let Some(email) = &self.email {
            if !email.contains('@') {
                return Some("email is not valid".to_string());
            }
        }
        None
    }
}
