//! Request DTOs for the auction API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use crate::auction::{AuctionStatus, ProductCondition};
use crate::error::Result;

pub const MIN_PRODUCT_NAME_LEN: usize = 2;
pub const MIN_CATEGORY_LEN: usize = 3;
pub const MIN_DESCRIPTION_LEN: usize = 10;
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// Request body for creating an auction (POST /auctions)
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAuctionRequest {
    pub product_name: String,
    pub category: String,
    pub description: String,
    pub condition: ProductCondition,
}

impl CreateAuctionRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.product_name.trim().chars().count() < MIN_PRODUCT_NAME_LEN {
            return Some(format!(
                "Product name must be at least {} characters",
                MIN_PRODUCT_NAME_LEN
            ));
        }
        if self.category.trim().chars().count() < MIN_CATEGORY_LEN {
            return Some(format!(
                "Category must be at least {} characters",
                MIN_CATEGORY_LEN
            ));
        }
        let description_len = self.description.trim().chars().count();
        if !(MIN_DESCRIPTION_LEN..=MAX_DESCRIPTION_LEN).contains(&description_len) {
            return Some(format!(
                "Description must be between {} and {} characters",
                MIN_DESCRIPTION_LEN, MAX_DESCRIPTION_LEN
            ));
        }
        None
    }
}

/// Query string for listing auctions (GET /auctions?status=...)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListAuctionsQuery {
    /// Raw status filter, case-insensitive
    #[serde(default)]
    pub status: Option<String>,
}

impl ListAuctionsQuery {
    /// Requested status, Active when absent or blank.
    pub fn status(&self) -> Result<AuctionStatus> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") => Ok(AuctionStatus::Active),
            Some(raw) => raw.parse(),
        }
    }
}
