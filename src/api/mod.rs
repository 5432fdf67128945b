//! API Module
//!
//! HTTP handlers and routing for the auction service REST API.
//!
//! # Endpoints
//! - `POST /auctions` - Create an auction
//! - `GET /auctions` - List auctions by status
//! - `GET /auctions/:id` - Fetch one auction
//! - `POST /auctions/close-expired` - Run an expiration pass now
//! - `GET /stats` - Closer statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
