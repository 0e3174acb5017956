//! TTL Sweep Task
//!
//! Reads already treat expired entries as absent, so nothing here affects
//! correctness. The sweeper exists to reclaim memory held by entries nobody
//! will ask for again, on a fixed cadence.

use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Starts the periodic sweeper. The first sweep runs one full interval after
/// spawn, and each sweep holds the store's write lock only while removing
/// entries. Abort the returned handle during shutdown.
pub fn spawn_cleanup_task(
    cache: Arc<RwLock<CacheStore>>,
    sweep_interval_secs: u64,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(interval_secs = sweep_interval_secs, "cache sweeper started");

        let mut ticker = interval(Duration::from_secs(sweep_interval_secs));
        // A stalled sweep must not be followed by a burst of catch-up ticks.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // interval fires once immediately; the cache is still empty then.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let removed = cache.write().await.sweep_expired();
            if removed > 0 {
                info!(removed, "sweep reclaimed expired entries");
            } else {
                debug!("sweep found nothing to reclaim");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared_store() -> Arc<RwLock<CacheStore>> {
        Arc::new(RwLock::new(CacheStore::new(100, Duration::from_secs(300))))
    }

    #[tokio::test]
    async fn test_sweeper_reclaims_only_dead_entries() {
        let cache = shared_store();
        {
            let mut guard = cache.write().await;
            guard
                .set(
                    "books:popular:{}".to_string(),
                    "[]".to_string(),
                    Some(Duration::from_millis(100)),
                )
                .unwrap();
            guard
                .set(
                    "libraries:region:{\"region\":\"11\"}".to_string(),
                    "[]".to_string(),
                    Some(Duration::from_secs(3600)),
                )
                .unwrap();
        }

        let handle = spawn_cleanup_task(cache.clone(), 1);
        tokio::time::sleep(Duration::from_millis(1500)).await;

        {
            let mut guard = cache.write().await;
            assert_eq!(guard.len(), 1, "only the dead entry should be swept");
            assert_eq!(
                guard.get("libraries:region:{\"region\":\"11\"}").as_deref(),
                Some("[]")
            );
            assert!(guard.stats().expired >= 1);
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweeper_stops_when_aborted() {
        let cache = shared_store();
        let handle = spawn_cleanup_task(cache, 1);

        handle.abort();
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(handle.is_finished());
    }
}
