//! TTL Cleanup Task
//!
//! Background task that periodically sweeps expired cache entries. The
//! cache already hides expired entries lazily on `get`; this sweep bounds
//! how long a dead entry can occupy memory between observations.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;

/// Spawns a background task that periodically cleans up expired entries.
///
/// Runs until aborted, sleeping `cleanup_interval_secs` between sweeps. The
/// returned handle is aborted during graceful shutdown.
pub fn spawn_cleanup_task(cache: SharedCache, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} seconds",
            cleanup_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut cache_guard = cache.write().await;
                cache_guard.cleanup_expired()
            };

            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::TtlCache;

    #[tokio::test]
    async fn test_cleanup_task_removes_expired_entries() {
        let cache = TtlCache::unbounded().shared();

        {
            let mut cache_guard = cache.write().await;
            cache_guard.set("expire_soon".to_string(), "value".to_string(), 1);
        }

        let handle = spawn_cleanup_task(cache.clone(), 1);

        // Wait for the entry to expire and one sweep to run.
        tokio::time::sleep(Duration::from_millis(2500)).await;

        {
            let cache_guard = cache.read().await;
            assert_eq!(cache_guard.len(), 0, "expired entry should be swept");
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_preserves_valid_entries() {
        let cache = TtlCache::unbounded().shared();

        {
            let mut cache_guard = cache.write().await;
            cache_guard.set("long_lived".to_string(), "value".to_string(), 3600);
        }

        let handle = spawn_cleanup_task(cache.clone(), 1);

        tokio::time::sleep(Duration::from_millis(1500)).await;

        {
            let mut cache_guard = cache.write().await;
            assert_eq!(cache_guard.get("long_lived"), Some("value".to_string()));
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let cache = TtlCache::unbounded().shared();

        let handle = spawn_cleanup_task(cache, 1);
        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "task should be finished after abort");
    }
}
