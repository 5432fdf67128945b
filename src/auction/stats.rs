//! Closer Statistics Module
//!
//! Tracks how many expiration passes ran and what they did.

use serde::Serialize;

// == Closer Stats ==
/// Counters maintained by the expiration closer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CloserStats {
    /// Passes that reached the store and succeeded
    pub passes: u64,
    /// Auctions moved to Completed across all passes
    pub closed_total: u64,
    /// Passes whose store update failed
    pub failed_passes: u64,
    /// Unix seconds of the most recent pass, successful or not
    pub last_pass_at: Option<i64>,
    /// Auctions closed by the most recent successful pass
    pub last_closed: u64,
}

impl CloserStats {
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Pass ==
    pub fn record_pass(&mut self, now: i64, closed: u64) {
        self.passes += 1;
        self.closed_total += closed;
        self.last_closed = closed;
        self.last_pass_at = Some(now);
    }

    // == Record Failure ==
    /// A failed pass leaves `last_closed` untouched.
    pub fn record_failure(&mut self, now: i64) {
        self.failed_passes += 1;
        self.last_pass_at = Some(now);
    }
}
