use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use tracing::instrument;

use super::super::error::OfferRouteResult;
use super::super::types::ApiResponse;
use crate::core::config::Config;
use crate::worker::sweeper::EscalationSweeper;

/// External cron-style entry point for one sweep tick. Fully idempotent:
/// calling it more often than the internal loop, or retrying after a
/// failure, cannot double-expire or double-escalate anything.
#[instrument(skip(config))]
async fn handle_run_sweep_request(State(config): State<Arc<Config>>) -> OfferRouteResult {
    let stats = EscalationSweeper::process_expired_offers(&config).await;
    Ok(Json(ApiResponse::success_with_data(stats, None)).into_response())
}

pub(crate) fn sweeper_router(config: Arc<Config>) -> Router {
    Router::new().route("/run", post(handle_run_sweep_request)).with_state(config)
}
