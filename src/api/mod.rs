//! API Module
//!
//! HTTP handlers and routing for the gateway's REST API.
//!
//! # Endpoints
//! - `GET /books/search` - Paged catalog search (title, author, isbn)
//! - `GET /books/search/:isbn` - Single-book detail
//! - `GET /books/trending` - Today's trending books
//! - `GET /books/popularloanbooks` - Most-loaned books of the past month
//! - `GET /books/loanstatus` - Loan availability at one library
//! - `GET /search` - Combined title+author search
//! - `GET /libraries/searchbyregion` - Region roster
//! - `GET /libraries/searchbyisbn` - Region roster annotated with holdings
//! - `POST /feedback` - Forward user feedback to the notifier
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
