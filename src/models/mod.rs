//! Domain models and API DTOs
//!
//! The book and library shapes the gateway serves, plus the request/response
//! bodies of the HTTP surface.

pub mod book;
pub mod library;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use book::{BookRecord, LoanStatus, SearchMode, SearchResult, PAGE_SIZE};
pub use library::{AnnotatedLibrary, LibraryRecord};
pub use requests::{
    BookSearchQuery, CombinedSearchQuery, FeedbackRequest, LibrarySearchQuery, LoanStatusQuery,
    RegionQuery,
};
pub use responses::{ErrorResponse, FeedbackResponse, HealthResponse, StatsResponse};
