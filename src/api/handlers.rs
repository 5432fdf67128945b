//! API Handlers
//!
//! HTTP request handlers for each auction service endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use tracing::{error, info};

use crate::auction::{
    current_timestamp, Auction, AuctionStore, ExpirationCloser, InMemoryAuctionStore,
};
use crate::config::{check_period, Config};
use crate::error::{AuctionError, Result};
use crate::models::{
    AuctionListResponse, AuctionResponse, CloseExpiredResponse, CreateAuctionRequest,
    HealthResponse, ListAuctionsQuery, StatsResponse,
};
use crate::tasks::AutoCloseTrigger;

/// Application state shared across all handlers.
///
/// The store handle is shared between request handlers and the closer; no
/// transaction spans both.
#[derive(Clone)]
pub struct AppState {
    /// Shared auction store
    pub store: Arc<dyn AuctionStore>,
    /// Closer bound to the same store
    pub closer: Arc<ExpirationCloser>,
    /// Trigger for the running auto-close task, if one was started
    pub auto_close: Option<AutoCloseTrigger>,
}

impl AppState {
    /// Creates a new AppState over the given store.
    pub fn new(store: Arc<dyn AuctionStore>, auction_interval: Duration) -> Self {
        let closer = Arc::new(ExpirationCloser::new(store.clone(), auction_interval));
        Self {
            store,
            closer,
            auto_close: None,
        }
    }

    /// Creates a new AppState from configuration, backed by an in-memory store.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(InMemoryAuctionStore::new()), config.auction_interval)
    }

    /// Routes manual passes through the given auto-close task.
    pub fn with_auto_close(mut self, trigger: AutoCloseTrigger) -> Self {
        self.auto_close = Some(trigger);
        self
    }

    pub fn auction_interval(&self) -> Duration {
        self.closer.interval()
    }
}

/// Handler for POST /auctions
///
/// Creates a new Active auction stamped with the current time. Bodies that
/// fail to deserialize are rejected with 400.
pub async fn create_auction_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateAuctionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuctionResponse>)> {
    let Json(req) = payload?;
    if let Some(error_msg) = req.validate() {
        return Err(AuctionError::InvalidRequest(error_msg));
    }

    let auction = Auction::new(
        req.product_name.trim(),
        req.category.trim(),
        req.description.trim(),
        req.condition,
        current_timestamp(),
    );

    if let Err(err) = state.store.insert(auction.clone()).await {
        error!(error = %err, auction_id = %auction.id, "Error trying to insert auction");
        return Err(err);
    }
    info!(auction_id = %auction.id, "Auction created");

    Ok((
        StatusCode::CREATED,
        Json(AuctionResponse::new(auction, state.auction_interval())),
    ))
}

/// Handler for GET /auctions/:id
pub async fn get_auction_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AuctionResponse>> {
    let auction = state.store.find_by_id(&id).await?;

    Ok(Json(AuctionResponse::new(auction, state.auction_interval())))
}

/// Handler for GET /auctions?status=active|completed
///
/// Lists auctions with the requested status, Active by default.
pub async fn list_auctions_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<ListAuctionsQuery>, QueryRejection>,
) -> Result<Json<AuctionListResponse>> {
    let Query(query) = query?;
    let status = query.status()?;
    let interval = state.auction_interval();

    let auctions = state
        .store
        .find_by_status(status)
        .await?
        .into_iter()
        .map(|auction| AuctionResponse::new(auction, interval))
        .collect();

    Ok(Json(AuctionListResponse::new(status, auctions)))
}

/// Handler for POST /auctions/close-expired
///
/// Runs an expiration pass now. When the auto-close task is running the pass
/// is queued behind any tick in progress.
pub async fn close_expired_handler(
    State(state): State<AppState>,
) -> Result<Json<CloseExpiredResponse>> {
    let closed = match &state.auto_close {
        Some(trigger) => trigger.trigger().await?,
        None => state.closer.try_close_expired(current_timestamp()).await?,
    };

    Ok(Json(CloseExpiredResponse { closed }))
}

/// Handler for GET /stats
///
/// Returns closer statistics and the effective timing configuration.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let interval = state.auction_interval();

    Json(StatsResponse {
        auction_interval_secs: interval.as_secs(),
        check_period_secs: check_period(interval).as_secs(),
        auto_close_running: state
            .auto_close
            .as_ref()
            .map(AutoCloseTrigger::is_active)
            .unwrap_or(false),
        closer: state.closer.stats().await,
    })
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
