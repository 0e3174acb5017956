//! Upstream endpoint map
//!
//! Names every outbound call the gateway makes and where it goes. All but
//! the fallback live under the catalog base URL and share its auth scheme.

// == Endpoint Enum ==
/// One upstream operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Book search by title, author, or ISBN
    SearchBooks,
    /// Single-book detail with loan info
    BookDetail,
    /// Daily trending books, bucketed by date
    HotTrend,
    /// Most-loaned books over a date window
    PopularLoans,
    /// Availability of one book at one library
    LoanStatus,
    /// Library roster for a region
    LibrariesByRegion,
    /// Libraries holding a given book
    LibrariesByBook,
    /// Secondary provider used when the catalog has no detail record
    FallbackBookSearch,
}

impl Endpoint {
    /// Path under the catalog base URL. Empty for the fallback provider,
    /// whose configured URL is already complete.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::SearchBooks => "/srchBooks",
            Endpoint::BookDetail => "/srchDtlList",
            Endpoint::HotTrend => "/hotTrend",
            Endpoint::PopularLoans => "/loanItemSrch",
            Endpoint::LoanStatus => "/bookExist",
            Endpoint::LibrariesByRegion => "/libSrch",
            Endpoint::LibrariesByBook => "/libSrchByBook",
            Endpoint::FallbackBookSearch => "",
        }
    }

    /// Stable name used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::SearchBooks => "searchBooks",
            Endpoint::BookDetail => "bookDetail",
            Endpoint::HotTrend => "hotTrend",
            Endpoint::PopularLoans => "popularLoans",
            Endpoint::LoanStatus => "loanStatus",
            Endpoint::LibrariesByRegion => "librariesByRegion",
            Endpoint::LibrariesByBook => "librariesByBook",
            Endpoint::FallbackBookSearch => "fallbackBookSearch",
        }
    }

    /// Whether this call goes to the fallback provider instead of the catalog.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Endpoint::FallbackBookSearch)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_endpoints_have_paths() {
        assert_eq!(Endpoint::SearchBooks.path(), "/srchBooks");
        assert_eq!(Endpoint::BookDetail.path(), "/srchDtlList");
        assert_eq!(Endpoint::LibrariesByRegion.path(), "/libSrch");
    }

    #[test]
    fn test_only_fallback_is_fallback() {
        assert!(Endpoint::FallbackBookSearch.is_fallback());
        assert!(Endpoint::FallbackBookSearch.path().is_empty());
        assert!(!Endpoint::SearchBooks.is_fallback());
        assert!(!Endpoint::LoanStatus.is_fallback());
    }
}
