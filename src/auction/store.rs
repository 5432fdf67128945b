//! Auction Store Module
//!
//! Storage boundary used by the HTTP handlers and the expiration closer,
//! plus the in-memory engine that backs it.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::auction::{Auction, AuctionStatus};
use crate::error::{AuctionError, Result};

// == Expiration Filter ==
/// Match condition for a bulk update: `status == status AND timestamp <= timestamp_lte`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpirationFilter {
    pub status: AuctionStatus,
    pub timestamp_lte: i64,
}

impl ExpirationFilter {
    /// Filter selecting every Active auction created at or before `cutoff`.
    pub fn active_until(cutoff: i64) -> Self {
        Self {
            status: AuctionStatus::Active,
            timestamp_lte: cutoff,
        }
    }

    pub fn matches(&self, auction: &Auction) -> bool {
        auction.status == self.status && auction.timestamp <= self.timestamp_lte
    }
}

// == Auction Store Trait ==
/// Persistence operations required by the service.
///
/// `bulk_conditional_update` must be atomic with respect to other callers of
/// the same operation: a record is either matched and modified by exactly one
/// call or not at all. Expiration safety across processes relies on this.
#[async_trait]
pub trait AuctionStore: Send + Sync {
    /// Persists a new auction. Fails with `Conflict` if the id is taken.
    async fn insert(&self, auction: Auction) -> Result<()>;

    /// Sets `status` on every record matching `filter`, returning how many
    /// records were modified.
    async fn bulk_conditional_update(
        &self,
        filter: ExpirationFilter,
        status: AuctionStatus,
    ) -> Result<u64>;

    async fn find_by_id(&self, id: &str) -> Result<Auction>;

    /// Records with the given status, oldest first.
    async fn find_by_status(&self, status: AuctionStatus) -> Result<Vec<Auction>>;
}

// == In-Memory Store ==
/// HashMap-backed store guarded by a single RwLock.
#[derive(Debug, Default)]
pub struct InMemoryAuctionStore {
    auctions: RwLock<HashMap<String, Auction>>,
}

impl InMemoryAuctionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored auctions.
    pub async fn len(&self) -> usize {
        self.auctions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.auctions.read().await.is_empty()
    }
}

#[async_trait]
impl AuctionStore for InMemoryAuctionStore {
    async fn insert(&self, auction: Auction) -> Result<()> {
        let mut auctions = self.auctions.write().await;
        if auctions.contains_key(&auction.id) {
            return Err(AuctionError::Conflict(auction.id));
        }
        auctions.insert(auction.id.clone(), auction);
        Ok(())
    }

    async fn bulk_conditional_update(
        &self,
        filter: ExpirationFilter,
        status: AuctionStatus,
    ) -> Result<u64> {
        // Match and modify under one write guard so concurrent callers
        // observe either none or all of this update.
        let mut auctions = self.auctions.write().await;
        let mut modified = 0u64;

        for auction in auctions.values_mut() {
            if filter.matches(auction) && auction.status.can_transition_to(status) {
                auction.status = status;
                modified += 1;
            }
        }

        Ok(modified)
    }

    async fn find_by_id(&self, id: &str) -> Result<Auction> {
        self.auctions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| AuctionError::NotFound(id.to_string()))
    }

    async fn find_by_status(&self, status: AuctionStatus) -> Result<Vec<Auction>> {
        let auctions = self.auctions.read().await;
        let mut matching: Vec<Auction> = auctions
            .values()
            .filter(|auction| auction.status == status)
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));
        Ok(matching)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::auction::ProductCondition;

    fn auction_at(id: &str, timestamp: i64) -> Auction {
        Auction {
            id: id.to_string(),
            product_name: "Lamp".to_string(),
            category: "Home".to_string(),
            description: "Brass desk lamp with shade".to_string(),
            condition: ProductCondition::New,
            status: AuctionStatus::Active,
            timestamp,
        }
    }

    #[tokio::test]
    async fn test_store_insert_and_find() {
        let store = InMemoryAuctionStore::new();
        store.insert(auction_at("a1", 100)).await.unwrap();

        let found = store.find_by_id("a1").await.unwrap();
        assert_eq!(found.timestamp, 100);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_store_insert_duplicate() {
        let store = InMemoryAuctionStore::new();
        store.insert(auction_at("a1", 100)).await.unwrap();

        let result = store.insert(auction_at("a1", 200)).await;
        assert!(matches!(result, Err(AuctionError::Conflict(_))));
        assert_eq!(store.find_by_id("a1").await.unwrap().timestamp, 100);
    }

    #[tokio::test]
    async fn test_store_find_nonexistent() {
        let store = InMemoryAuctionStore::new();
        assert!(store.is_empty().await);

        let result = store.find_by_id("missing").await;
        assert!(matches!(result, Err(AuctionError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_bulk_update_matches_filter_only() {
        let store = InMemoryAuctionStore::new();
        store.insert(auction_at("old", 100)).await.unwrap();
        store.insert(auction_at("edge", 200)).await.unwrap();
        store.insert(auction_at("new", 300)).await.unwrap();

        let modified = store
            .bulk_conditional_update(ExpirationFilter::active_until(200), AuctionStatus::Completed)
            .await
            .unwrap();

        assert_eq!(modified, 2);
        assert_eq!(store.find_by_id("old").await.unwrap().status, AuctionStatus::Completed);
        assert_eq!(store.find_by_id("edge").await.unwrap().status, AuctionStatus::Completed);
        assert_eq!(store.find_by_id("new").await.unwrap().status, AuctionStatus::Active);
    }

    #[tokio::test]
    async fn test_bulk_update_is_idempotent() {
        let store = InMemoryAuctionStore::new();
        store.insert(auction_at("a1", 100)).await.unwrap();

        let filter = ExpirationFilter::active_until(150);
        let first = store
            .bulk_conditional_update(filter, AuctionStatus::Completed)
            .await
            .unwrap();
        let second = store
            .bulk_conditional_update(filter, AuctionStatus::Completed)
            .await
            .unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 0);
    }

    #[tokio::test]
    async fn test_bulk_update_never_reverses() {
        let store = InMemoryAuctionStore::new();
        store.insert(auction_at("a1", 100)).await.unwrap();
        store
            .bulk_conditional_update(ExpirationFilter::active_until(100), AuctionStatus::Completed)
            .await
            .unwrap();

        let filter = ExpirationFilter {
            status: AuctionStatus::Completed,
            timestamp_lte: 100,
        };
        let modified = store
            .bulk_conditional_update(filter, AuctionStatus::Active)
            .await
            .unwrap();

        assert_eq!(modified, 0);
        assert_eq!(store.find_by_id("a1").await.unwrap().status, AuctionStatus::Completed);
    }

    #[tokio::test]
    async fn test_find_by_status_ordered() {
        let store = InMemoryAuctionStore::new();
        store.insert(auction_at("b", 300)).await.unwrap();
        store.insert(auction_at("a", 100)).await.unwrap();
        store.insert(auction_at("c", 200)).await.unwrap();

        let active = store.find_by_status(AuctionStatus::Active).await.unwrap();
        let ids: Vec<&str> = active.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "b"]);

        let completed = store.find_by_status(AuctionStatus::Completed).await.unwrap();
        assert!(completed.is_empty());
    }
}
