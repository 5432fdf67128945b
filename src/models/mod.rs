//! Request and Response models for the auction API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{CreateAuctionRequest, ListAuctionsQuery};
pub use responses::{
    AuctionListResponse, AuctionResponse, CloseExpiredResponse, HealthResponse, StatsResponse,
};
