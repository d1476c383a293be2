use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::instrument;
use uuid::Uuid;

use super::super::error::{OfferRouteError, OfferRouteResult};
use super::super::types::{
    AcceptOfferRequest, ApiResponse, CancelOfferRequest, DeclineOfferRequest, OfferId, OfferResponse,
};
use crate::core::config::Config;
use crate::worker::service::{EscalationOutcome, OfferService};

/// A worker claims the offer. Exactly one caller can ever succeed here;
/// everyone else gets a 409 "already taken".
#[instrument(skip(config, payload), fields(offer_id = %id, worker_id = %payload.worker_id))]
async fn handle_accept_offer_request(
    Path(OfferId { id }): Path<OfferId>,
    State(config): State<Arc<Config>>,
    Json(payload): Json<AcceptOfferRequest>,
) -> OfferRouteResult {
    let offer_id = parse_offer_id(&id)?;
    let offer = OfferService::accept_offer(&config, offer_id, &payload.worker_id).await?;
    Ok(Json(ApiResponse::success_with_data(
        OfferResponse::from(&offer),
        Some("Offer accepted".to_string()),
    ))
    .into_response())
}

/// A worker turns the offer down. Escalation runs synchronously, so the
/// response already says whether the job moved to the next rung or an
/// administrator was alerted.
#[instrument(skip(config, payload), fields(offer_id = %id, worker_id = %payload.worker_id))]
async fn handle_decline_offer_request(
    Path(OfferId { id }): Path<OfferId>,
    State(config): State<Arc<Config>>,
    Json(payload): Json<DeclineOfferRequest>,
) -> OfferRouteResult {
    let offer_id = parse_offer_id(&id)?;
    let outcome =
        OfferService::decline_offer(&config, offer_id, &payload.worker_id, payload.reason).await?;

    let response = match outcome {
        EscalationOutcome::Escalated(next) => Json(ApiResponse::success_with_data(
            OfferResponse::from(&next),
            Some("Offer declined, escalated to next attempt".to_string()),
        ))
        .into_response(),
        EscalationOutcome::AdminAlerted => Json(ApiResponse::success(Some(
            "Offer declined, escalation ladder exhausted, administrators alerted".to_string(),
        )))
        .into_response(),
    };
    Ok(response)
}

/// Administrative abort of an open offer, used when the job is cancelled.
#[instrument(skip(config, payload), fields(offer_id = %id, actor = %payload.actor))]
async fn handle_cancel_offer_request(
    Path(OfferId { id }): Path<OfferId>,
    State(config): State<Arc<Config>>,
    Json(payload): Json<CancelOfferRequest>,
) -> OfferRouteResult {
    let offer_id = parse_offer_id(&id)?;
    let offer = OfferService::cancel_offer(&config, offer_id, &payload.actor, payload.reason).await?;
    Ok(Json(ApiResponse::success_with_data(
        OfferResponse::from(&offer),
        Some("Offer cancelled".to_string()),
    ))
    .into_response())
}

#[instrument(skip(config), fields(offer_id = %id))]
async fn handle_get_offer_request(
    Path(OfferId { id }): Path<OfferId>,
    State(config): State<Arc<Config>>,
) -> OfferRouteResult {
    let offer_id = parse_offer_id(&id)?;
    let offer = config
        .database()
        .get_offer_by_id(offer_id)
        .await
        .map_err(|e| OfferRouteError::InternalError(e.to_string()))?
        .ok_or_else(|| OfferRouteError::NotFound(format!("offer {}", id)))?;
    Ok(Json(ApiResponse::success_with_data(OfferResponse::from(&offer), None)).into_response())
}

fn parse_offer_id(id: &str) -> Result<Uuid, OfferRouteError> {
    Uuid::parse_str(id).map_err(|_| OfferRouteError::InvalidId(id.to_string()))
}

pub(crate) fn offer_router(config: Arc<Config>) -> Router {
    Router::new()
        .route("/:id", get(handle_get_offer_request))
        .route("/:id/accept", post(handle_accept_offer_request))
        .route("/:id/decline", post(handle_decline_offer_request))
        .route("/:id/cancel", post(handle_cancel_offer_request))
        .with_state(config)
}
