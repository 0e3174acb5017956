//! Response DTOs for the gateway API
//!
//! Operational response bodies; the domain payloads themselves live in the
//! book and library model modules.

use serde::Serialize;

use crate::cache::CacheStats;

/// Body of `GET /stats`: a snapshot of the cache counters plus the derived
/// hit rate, so callers never have to compute it themselves.
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expired: u64,
    pub total_entries: usize,
    pub hit_rate: f64,
}

impl StatsResponse {
    pub fn new(stats: &CacheStats) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expired: stats.expired,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Body of `GET /health`. The timestamp is RFC 3339 so probes can log it
/// without reformatting.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Acknowledgement for `POST /feedback`. Acceptance says the message was
/// relayed, not that anyone read it.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackResponse {
    pub message: String,
}

impl FeedbackResponse {
    pub fn accepted() -> Self {
        Self {
            message: "feedback received".to_string(),
        }
    }
}

/// The single error shape every failing endpoint returns: `{"error": "..."}`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn to_value<T: Serialize>(dto: &T) -> Value {
        serde_json::to_value(dto).unwrap()
    }

    #[test]
    fn test_stats_body_carries_all_counters() {
        let mut stats = CacheStats::new();
        for _ in 0..8 {
            stats.record_hit();
        }
        stats.record_miss();
        stats.record_miss();
        stats.record_eviction();
        stats.record_expired();
        stats.set_total_entries(6);

        let body = to_value(&StatsResponse::new(&stats));
        assert_eq!(body["hits"], 8);
        assert_eq!(body["misses"], 2);
        assert_eq!(body["evictions"], 1);
        assert_eq!(body["expired"], 1);
        assert_eq!(body["total_entries"], 6);
        assert!((body["hit_rate"].as_f64().unwrap() - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_stats_body_for_untouched_cache() {
        let body = to_value(&StatsResponse::new(&CacheStats::new()));
        assert_eq!(body["hit_rate"], 0.0);
        assert_eq!(body["total_entries"], 0);
    }

    #[test]
    fn test_health_timestamp_parses_as_rfc3339() {
        let resp = HealthResponse::healthy();
        assert_eq!(resp.status, "healthy");
        assert!(chrono::DateTime::parse_from_rfc3339(&resp.timestamp).is_ok());
    }

    #[test]
    fn test_feedback_ack_wording() {
        let body = to_value(&FeedbackResponse::accepted());
        assert_eq!(body, json!({"message": "feedback received"}));
    }

    #[test]
    fn test_error_body_is_a_single_field() {
        let body = to_value(&ErrorResponse::new("can not get books"));
        assert_eq!(body, json!({"error": "can not get books"}));
    }
}
