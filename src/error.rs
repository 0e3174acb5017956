//! Error types for the gateway
//!
//! Provides unified error handling using thiserror. Three families live here:
//! `GatewayError` is what callers of the HTTP API can observe, `FetchError`
//! classifies upstream failures in full detail, and `CacheError` covers the
//! cache layer (which is advisory and never surfaces to callers).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Gateway Error Enum ==
/// Caller-visible error type for the gateway.
///
/// Upstream failures are deliberately generic here: the full detail goes to
/// the logs and the notifier, while callers only see "can not get {what}".
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Invalid caller input
    #[error("{0}")]
    Validation(String),

    /// An upstream dependency failed; the payload names what was requested
    #[error("can not get {0}")]
    Upstream(String),

    /// Unexpected internal failure; the payload is logged, never shown
    #[error("internal error")]
    Internal(String),
}

impl GatewayError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn upstream(what: impl Into<String>) -> Self {
        Self::Upstream(what.into())
    }

    pub fn internal(detail: impl ToString) -> Self {
        Self::Internal(detail.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::Upstream(_) => StatusCode::BAD_GATEWAY,
            GatewayError::Internal(detail) => {
                tracing::error!(detail = %detail, "internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Fetch Error Enum ==
/// Detailed classification of a single upstream request failure.
///
/// These never reach API callers directly; the services fold them into
/// `GatewayError::Upstream` after logging and notifying.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request never completed (connect failure, timeout, redirect cap)
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The upstream answered with a non-success status
    #[error("{endpoint} returned status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: u16,
        body: String,
    },

    /// The response body was not the JSON shape we understand
    #[error("could not decode {endpoint} response: {detail}")]
    Decode {
        endpoint: &'static str,
        detail: String,
    },

    /// The upstream answered 200 but reported an application-level error
    #[error("{endpoint} reported an error: {message}")]
    Api {
        endpoint: &'static str,
        message: String,
    },

    /// A field the operation requires was missing from the payload
    #[error("{endpoint} response missing {field}")]
    Shape {
        endpoint: &'static str,
        field: &'static str,
    },
}

impl FetchError {
    pub fn decode(endpoint: &'static str, detail: impl ToString) -> Self {
        Self::Decode {
            endpoint,
            detail: detail.to_string(),
        }
    }

    pub fn shape(endpoint: &'static str, field: &'static str) -> Self {
        Self::Shape { endpoint, field }
    }
}

// == Cache Error Enum ==
/// Failures inside the cache layer.
///
/// The cache is advisory: every variant here is logged and swallowed by the
/// cache-aside wrapper, never propagated to callers.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key exceeds the store's length bound
    #[error("cache key exceeds maximum length of {0} bytes")]
    KeyTooLong(usize),

    /// Serialized value exceeds the store's size bound
    #[error("cache value exceeds maximum size of {0} bytes")]
    ValueTooLarge(usize),

    /// A key or payload could not be JSON-encoded
    #[error("could not encode cache payload: {0}")]
    Encode(#[from] serde_json::Error),

    /// The backend itself failed (reserved for remote backends)
    #[error("cache backend unavailable: {0}")]
    Backend(String),
}

// == Result Type Alias ==
/// Convenience Result type for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;
