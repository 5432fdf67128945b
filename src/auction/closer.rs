//! Expiration Closer
//!
//! Moves every Active auction whose window has elapsed to Completed with a
//! single conditional bulk update.
//!
//! A record that is already Completed no longer matches the filter, so a pass
//! can be repeated, or run concurrently from another process against the same
//! store, without double transitions. The pass lock below only prevents
//! overlapping passes inside this process.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info};

use crate::auction::{
    interval_secs, AuctionStatus, AuctionStore, CloserStats, ExpirationFilter,
};
use crate::error::Result;

// == Expiration Closer ==
pub struct ExpirationCloser {
    store: Arc<dyn AuctionStore>,
    interval: Duration,
    pass_lock: Mutex<()>,
    stats: RwLock<CloserStats>,
}

impl ExpirationCloser {
    // == Constructor ==
    /// Creates a closer that expires auctions older than `interval`.
    pub fn new(store: Arc<dyn AuctionStore>, interval: Duration) -> Self {
        Self {
            store,
            interval,
            pass_lock: Mutex::new(()),
            stats: RwLock::new(CloserStats::new()),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn store(&self) -> &Arc<dyn AuctionStore> {
        &self.store
    }

    // == Cutoff ==
    /// Latest creation instant still eligible for closing at `now`.
    pub fn cutoff(&self, now: i64) -> i64 {
        now.saturating_sub(interval_secs(self.interval))
    }

    // == Try Close Expired ==
    /// Runs one pass and surfaces store failures to the caller.
    ///
    /// # Arguments
    /// * `now` - Current Unix time in seconds
    ///
    /// # Returns
    /// The number of auctions moved to Completed by this pass.
    pub async fn try_close_expired(&self, now: i64) -> Result<u64> {
        let _guard = self.pass_lock.lock().await;

        let cutoff = self.cutoff(now);
        let result = self
            .store
            .bulk_conditional_update(ExpirationFilter::active_until(cutoff), AuctionStatus::Completed)
            .await;

        match result {
            Ok(closed) => {
                self.stats.write().await.record_pass(now, closed);
                if closed > 0 {
                    info!(closed, cutoff, "Closed expired auctions");
                } else {
                    debug!(cutoff, "No expired auctions to close");
                }
                Ok(closed)
            }
            Err(err) => {
                self.stats.write().await.record_failure(now);
                Err(err)
            }
        }
    }

    // == Close Expired ==
    /// Runs one pass on behalf of the background task.
    ///
    /// Store failures are logged and reported as zero closed auctions; the
    /// affected records stay Active and are picked up by the next pass.
    pub async fn close_expired(&self, now: i64) -> u64 {
        match self.try_close_expired(now).await {
            Ok(closed) => closed,
            Err(err) => {
                error!(error = %err, "Error trying to close expired auctions");
                0
            }
        }
    }

    // == Stats ==
    pub async fn stats(&self) -> CloserStats {
        self.stats.read().await.clone()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::auction::{Auction, InMemoryAuctionStore, ProductCondition};
    use crate::error::AuctionError;
    use async_trait::async_trait;

    const NOW: i64 = 1_700_000_000;

    struct FailingStore;

    #[async_trait]
    impl AuctionStore for FailingStore {
        async fn insert(&self, _auction: Auction) -> Result<()> {
            Err(AuctionError::Store("unavailable".to_string()))
        }

        async fn bulk_conditional_update(
            &self,
            _filter: ExpirationFilter,
            _status: AuctionStatus,
        ) -> Result<u64> {
            Err(AuctionError::Store("unavailable".to_string()))
        }

        async fn find_by_id(&self, id: &str) -> Result<Auction> {
            Err(AuctionError::NotFound(id.to_string()))
        }

        async fn find_by_status(&self, _status: AuctionStatus) -> Result<Vec<Auction>> {
            Err(AuctionError::Store("unavailable".to_string()))
        }
    }

    fn auction_at(timestamp: i64) -> Auction {
        Auction::new(
            "Camera",
            "Photo",
            "Vintage film camera, tested",
            ProductCondition::Used,
            timestamp,
        )
    }

    async fn seeded_closer(interval_secs: u64, timestamps: &[i64]) -> (ExpirationCloser, Vec<String>) {
        let store = Arc::new(InMemoryAuctionStore::new());
        let mut ids = Vec::new();
        for &ts in timestamps {
            let auction = auction_at(ts);
            ids.push(auction.id.clone());
            store.insert(auction).await.unwrap();
        }
        let closer = ExpirationCloser::new(store, Duration::from_secs(interval_secs));
        (closer, ids)
    }

    #[test]
    fn test_cutoff() {
        let closer = ExpirationCloser::new(
            Arc::new(InMemoryAuctionStore::new()),
            Duration::from_secs(20),
        );
        assert_eq!(closer.cutoff(NOW), NOW - 20);
        assert_eq!(closer.cutoff(i64::MIN), i64::MIN);
    }

    #[tokio::test]
    async fn test_closes_only_expired() {
        let (closer, ids) = seeded_closer(3, &[NOW - 5, NOW]).await;

        let closed = closer.close_expired(NOW).await;
        assert_eq!(closed, 1);

        let expired = closer.store().find_by_id(&ids[0]).await.unwrap();
        let fresh = closer.store().find_by_id(&ids[1]).await.unwrap();
        assert_eq!(expired.status, AuctionStatus::Completed);
        assert_eq!(fresh.status, AuctionStatus::Active);
    }

    #[tokio::test]
    async fn test_boundary_is_inclusive() {
        let (closer, ids) = seeded_closer(10, &[NOW - 10, NOW - 9]).await;

        assert_eq!(closer.close_expired(NOW).await, 1);
        let at_cutoff = closer.store().find_by_id(&ids[0]).await.unwrap();
        assert_eq!(at_cutoff.status, AuctionStatus::Completed);
    }

    #[tokio::test]
    async fn test_second_pass_closes_nothing() {
        let (closer, _) = seeded_closer(2, &[NOW - 4, NOW - 4, NOW - 4]).await;

        assert_eq!(closer.close_expired(NOW).await, 3);
        assert_eq!(closer.close_expired(NOW).await, 0);

        let stats = closer.stats().await;
        assert_eq!(stats.passes, 2);
        assert_eq!(stats.closed_total, 3);
        assert_eq!(stats.last_closed, 0);
    }

    #[tokio::test]
    async fn test_later_pass_picks_up_newly_expired() {
        let (closer, ids) = seeded_closer(5, &[NOW - 10, NOW]).await;

        assert_eq!(closer.close_expired(NOW).await, 1);
        assert_eq!(closer.close_expired(NOW + 5).await, 1);
        let late = closer.store().find_by_id(&ids[1]).await.unwrap();
        assert_eq!(late.status, AuctionStatus::Completed);
    }

    #[tokio::test]
    async fn test_store_failure_is_swallowed() {
        let closer = ExpirationCloser::new(Arc::new(FailingStore), Duration::from_secs(3));

        assert_eq!(closer.close_expired(NOW).await, 0);
        assert!(matches!(
            closer.try_close_expired(NOW).await,
            Err(AuctionError::Store(_))
        ));

        let stats = closer.stats().await;
        assert_eq!(stats.passes, 0);
        assert_eq!(stats.failed_passes, 2);
        assert_eq!(stats.last_pass_at, Some(NOW));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_closers_share_store() {
        let store = Arc::new(InMemoryAuctionStore::new());
        for _ in 0..50 {
            store.insert(auction_at(NOW - 100)).await.unwrap();
        }

        let first = Arc::new(ExpirationCloser::new(store.clone(), Duration::from_secs(10)));
        let second = Arc::new(ExpirationCloser::new(store.clone(), Duration::from_secs(10)));

        let a = tokio::spawn({
            let closer = first.clone();
            async move { closer.close_expired(NOW).await }
        });
        let b = tokio::spawn({
            let closer = second.clone();
            async move { closer.close_expired(NOW).await }
        });

        let total = a.await.unwrap() + b.await.unwrap();
        assert_eq!(total, 50);

        let completed = store.find_by_status(AuctionStatus::Completed).await.unwrap();
        assert_eq!(completed.len(), 50);
    }
}
