//! Auction Expiry - An auction service that closes auctions automatically
//!
//! Auctions are created Active and a background task moves them to Completed
//! once their configured interval has elapsed.

pub mod api;
pub mod auction;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::{spawn_auto_close_task, AutoCloseHandle};
