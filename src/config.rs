//! Configuration Module
//!
//! Handles loading server configuration from environment variables and
//! resolving the auction interval.

use std::env;
use std::time::Duration;

use tracing::warn;

// == Constants ==
/// Auction lifetime used when `AUCTION_INTERVAL` is absent or malformed.
pub const DEFAULT_AUCTION_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Lower bound on how often the auto-close task polls the store.
pub const MIN_CHECK_PERIOD: Duration = Duration::from_secs(10);

/// Default HTTP port.
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Environment variable holding the auction interval.
pub const AUCTION_INTERVAL_VAR: &str = "AUCTION_INTERVAL";

/// Environment variable holding the HTTP port.
pub const SERVER_PORT_VAR: &str = "SERVER_PORT";

// == Interval Resolver ==
/// Resolves free-form duration text ("20s", "5m", "1h30m") into the auction
/// interval.
///
/// Every number needs a unit; a bare "0" is the only exception. Empty or
/// unparsable input never fails: it is logged and replaced by
/// [`DEFAULT_AUCTION_INTERVAL`].
pub fn resolve_auction_interval(raw: &str) -> Duration {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        warn!(
            default = ?DEFAULT_AUCTION_INTERVAL,
            "{} is empty, using default auction interval", AUCTION_INTERVAL_VAR
        );
        return DEFAULT_AUCTION_INTERVAL;
    }

    if trimmed == "0" {
        return Duration::ZERO;
    }
    if trimmed.ends_with(|c: char| c.is_ascii_digit()) {
        warn!(
            value = trimmed,
            default = ?DEFAULT_AUCTION_INTERVAL,
            "{} is missing a unit, using default auction interval", AUCTION_INTERVAL_VAR
        );
        return DEFAULT_AUCTION_INTERVAL;
    }

    match humantime::parse_duration(trimmed) {
        Ok(duration) => duration,
        Err(err) => {
            warn!(
                value = trimmed,
                error = %err,
                default = ?DEFAULT_AUCTION_INTERVAL,
                "Error parsing {}, using default auction interval", AUCTION_INTERVAL_VAR
            );
            DEFAULT_AUCTION_INTERVAL
        }
    }
}

/// Period of the auto-close task: half the auction interval, floored at
/// [`MIN_CHECK_PERIOD`].
pub fn check_period(auction_interval: Duration) -> Duration {
    (auction_interval / 2).max(MIN_CHECK_PERIOD)
}

/// Server configuration parameters.
#[derive(Debug, Clone)]
pub struct Config {
    /// How long an auction accepts bids before it is closed
    pub auction_interval: Duration,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `AUCTION_INTERVAL` - Auction lifetime, e.g. "90s" or "1h30m" (default: 5m)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    pub fn from_env() -> Self {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Builds a Config from an arbitrary key lookup.
    pub fn from_source<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let auction_interval =
            resolve_auction_interval(&lookup(AUCTION_INTERVAL_VAR).unwrap_or_default());

        let server_port = lookup(SERVER_PORT_VAR)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_SERVER_PORT);

        Self {
            auction_interval,
            server_port,
        }
    }

    /// Scheduler period derived from the auction interval.
    pub fn check_period(&self) -> Duration {
        check_period(self.auction_interval)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auction_interval: DEFAULT_AUCTION_INTERVAL,
            server_port: DEFAULT_SERVER_PORT,
        }
    }
}
