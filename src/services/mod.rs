//! Service layer
//!
//! Operation-level logic between the HTTP handlers and the upstream client:
//! validation, cache keys and TTLs, fan-out joins, and the failure policy.

mod books;
mod libraries;
pub mod trending;

pub use books::BooksService;
pub use libraries::LibrariesService;
