//! Auction Entity Module
//!
//! Defines the auction record and its closed status/condition variants.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AuctionError;

// == Auction Status ==
/// Lifecycle state of an auction. The only legal transition is
/// `Active -> Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuctionStatus {
    Active,
    Completed,
}

impl AuctionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuctionStatus::Active => "active",
            AuctionStatus::Completed => "completed",
        }
    }

    /// Whether a record in this state may move to `next`.
    pub fn can_transition_to(&self, next: AuctionStatus) -> bool {
        matches!(
            (self, next),
            (AuctionStatus::Active, AuctionStatus::Completed)
        )
    }
}

impl fmt::Display for AuctionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuctionStatus {
    type Err = AuctionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(AuctionStatus::Active),
            "completed" => Ok(AuctionStatus::Completed),
            other => Err(AuctionError::InvalidRequest(format!(
                "Unknown auction status '{}'",
                other
            ))),
        }
    }
}

// == Product Condition ==
/// Condition of the item being auctioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCondition {
    New,
    Used,
    Refurbished,
}

// == Auction ==
/// A single auction record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Auction {
    /// Unique identifier
    pub id: String,
    pub product_name: String,
    pub category: String,
    pub description: String,
    pub condition: ProductCondition,
    /// Current lifecycle state
    pub status: AuctionStatus,
    /// Creation instant (Unix seconds)
    pub timestamp: i64,
}

impl Auction {
    // == Constructor ==
    /// Creates a new Active auction with a freshly generated id.
    pub fn new(
        product_name: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        condition: ProductCondition,
        timestamp: i64,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            product_name: product_name.into(),
            category: category.into(),
            description: description.into(),
            condition,
            status: AuctionStatus::Active,
            timestamp,
        }
    }

    // == Expires At ==
    /// Instant (Unix seconds) at which this auction becomes eligible for
    /// closing under the given interval.
    pub fn expires_at(&self, interval: Duration) -> i64 {
        self.timestamp.saturating_add(interval_secs(interval))
    }
}

// == Utility Functions ==
/// Interval expressed in whole seconds, clamped to `i64`.
pub fn interval_secs(interval: Duration) -> i64 {
    i64::try_from(interval.as_secs()).unwrap_or(i64::MAX)
}

/// Returns the current Unix timestamp in seconds.
pub fn current_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}
