//! Auction Module
//!
//! Auction records, the store boundary, and the expiration closer.

mod closer;
mod entity;
mod stats;
mod store;


// Re-export public types
pub use closer::ExpirationCloser;
pub use entity::{
    current_timestamp, interval_secs, Auction, AuctionStatus, ProductCondition,
};
pub use stats::CloserStats;
pub use store::{AuctionStore, ExpirationFilter, InMemoryAuctionStore};
