//! Response DTOs for the auction API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::time::Duration;

use serde::Serialize;

use crate::auction::{Auction, AuctionStatus, CloserStats, ProductCondition};

/// A single auction as returned by the API
#[derive(Debug, Clone, Serialize)]
pub struct AuctionResponse {
    pub id: String,
    pub product_name: String,
    pub category: String,
    pub description: String,
    pub condition: ProductCondition,
    pub status: AuctionStatus,
    /// Creation instant (Unix seconds)
    pub timestamp: i64,
    /// Instant (Unix seconds) at which the auction becomes eligible for closing
    pub expires_at: i64,
}

impl AuctionResponse {
    /// Creates a response from a stored auction and the active interval
    pub fn new(auction: Auction, interval: Duration) -> Self {
        let expires_at = auction.expires_at(interval);
        Self {
            id: auction.id,
            product_name: auction.product_name,
            category: auction.category,
            description: auction.description,
            condition: auction.condition,
            status: auction.status,
            timestamp: auction.timestamp,
            expires_at,
        }
    }
}

/// Response body for listing auctions (GET /auctions)
#[derive(Debug, Clone, Serialize)]
pub struct AuctionListResponse {
    pub status: AuctionStatus,
    pub count: usize,
    pub auctions: Vec<AuctionResponse>,
}

impl AuctionListResponse {
    pub fn new(status: AuctionStatus, auctions: Vec<AuctionResponse>) -> Self {
        Self {
            status,
            count: auctions.len(),
            auctions,
        }
    }
}

/// Response body for a manual expiration pass (POST /auctions/close-expired)
#[derive(Debug, Clone, Serialize)]
pub struct CloseExpiredResponse {
    /// Auctions moved to Completed by this pass
    pub closed: u64,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Configured auction interval in seconds
    pub auction_interval_secs: u64,
    /// Auto-close period in seconds
    pub check_period_secs: u64,
    /// Whether the auto-close task is running
    pub auto_close_running: bool,
    #[serde(flatten)]
    pub closer: CloserStats,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
