//! Cache Statistics Module
//!
//! Counters describing how the memoization layer is behaving. The `/stats`
//! endpoint snapshots these through `StatsResponse`.

// == Cache Stats ==
/// Running totals for the cache. `evictions` counts entries pushed out by the
/// capacity policy; `expired` counts entries whose TTL ran out, whether caught
/// on read or by the background sweep.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expired: u64,
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    // == Derived values ==

    /// Fraction of reads answered from the cache. A cache that has never been
    /// read reports 0.0 rather than dividing by zero.
    pub fn hit_rate(&self) -> f64 {
        match self.hits + self.misses {
            0 => 0.0,
            reads => self.hits as f64 / reads as f64,
        }
    }

    // == Recording ==

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_expired(&mut self) {
        self.expired += 1;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_stats_are_all_zero() {
        let stats = CacheStats::new();
        assert_eq!(
            (stats.hits, stats.misses, stats.evictions, stats.expired),
            (0, 0, 0, 0)
        );
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_tracks_read_outcomes_only() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_miss();
        stats.record_miss();

        // Evictions and expiries are not reads and must not move the rate.
        stats.record_eviction();
        stats.record_expired();

        let expected = 1.0 / 3.0;
        assert!((stats.hit_rate() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_counters_accumulate_independently() {
        let mut stats = CacheStats::new();
        for _ in 0..5 {
            stats.record_hit();
        }
        stats.record_miss();
        stats.record_eviction();
        stats.record_expired();
        stats.record_expired();
        stats.set_total_entries(9);

        assert_eq!(stats.hits, 5);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.expired, 2);
        assert_eq!(stats.total_entries, 9);
    }

    #[test]
    fn test_entry_count_is_overwritten_not_summed() {
        let mut stats = CacheStats::new();
        stats.set_total_entries(120);
        stats.set_total_entries(7);
        assert_eq!(stats.total_entries, 7);
    }
}
