use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use tracing::instrument;
use uuid::Uuid;

use super::super::error::{OfferRouteError, OfferRouteResult};
use super::super::types::{ApiResponse, CreateOfferRequest, JobId, OfferResponse};
use crate::core::config::Config;
use crate::types::offers::OfferMetadata;
use crate::worker::service::OfferService;

/// Dispatches a job: creates its attempt-1 offer. Attempt numbers beyond 1
/// are owned by the escalation path and cannot be requested externally.
#[instrument(skip(config, payload), fields(job_id = %id))]
async fn handle_create_offer_request(
    Path(JobId { id }): Path<JobId>,
    State(config): State<Arc<Config>>,
    Json(payload): Json<CreateOfferRequest>,
) -> OfferRouteResult {
    let job_id = Uuid::parse_str(&id).map_err(|_| OfferRouteError::InvalidId(id.clone()))?;

    let metadata = OfferMetadata {
        priority: payload.priority,
        estimated_duration_minutes: payload.estimated_duration_minutes,
        escalated_from: None,
        notes: payload.notes,
    };
    let actor = payload.requested_by.unwrap_or_else(|| "api".to_string());

    let offer = OfferService::create_offer(&config, job_id, 1, metadata, &actor).await?;
    Ok(Json(ApiResponse::success_with_data(
        OfferResponse::from(&offer),
        Some(format!("Offer created for job {}", id)),
    ))
    .into_response())
}

pub(crate) fn job_router(config: Arc<Config>) -> Router {
    Router::new().route("/:id/offers", post(handle_create_offer_request)).with_state(config)
}
