//! Error types for the auction service
//!
//! Provides unified error handling using thiserror.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Auction Error Enum ==
/// Unified error type for the auction service.
///
/// Malformed interval configuration is deliberately absent: the resolver in
/// [`crate::config`] recovers from it locally and never reports it.
#[derive(Error, Debug)]
pub enum AuctionError {
    /// No auction with the given id
    #[error("Auction not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// An auction with the same id already exists
    #[error("Auction already exists: {0}")]
    Conflict(String),

    /// The backing store rejected or failed an operation
    #[error("Store error: {0}")]
    Store(String),

    /// The auto-close scheduler is no longer accepting work
    #[error("Auto-close scheduler is stopped")]
    SchedulerStopped,
}

// == IntoResponse Implementation ==
impl IntoResponse for AuctionError {
    fn into_response(self) -> Response {
        let status = match &self {
            AuctionError::NotFound(_) => StatusCode::NOT_FOUND,
            AuctionError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AuctionError::Conflict(_) => StatusCode::CONFLICT,
            AuctionError::Store(_) | AuctionError::SchedulerStopped => {
                StatusCode::SERVICE_UNAVAILABLE
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Extractor Rejections ==
/// Malformed bodies (bad JSON, unknown enum values, missing fields) are
/// reported as 400 with the JSON error body.
impl From<JsonRejection> for AuctionError {
    fn from(rejection: JsonRejection) -> Self {
        AuctionError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AuctionError {
    fn from(rejection: QueryRejection) -> Self {
        AuctionError::InvalidRequest(rejection.body_text())
    }
}

// == Result Type Alias ==
/// Convenience Result type for the auction service.
pub type Result<T> = std::result::Result<T, AuctionError>;
