pub(super) mod jobs;
pub(super) mod offers;
pub(super) mod sweeper;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use super::types::ApiResponse;
use crate::core::config::Config;
use jobs::job_router;
use offers::offer_router;
use sweeper::sweeper_router;

/// Fallback for unmatched routes.
pub async fn handler_404() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ApiResponse::error("The requested resource was not found".to_string())))
}

async fn handle_health_request() -> impl IntoResponse {
    Json(ApiResponse::success(Some("UP".to_string())))
}

pub(crate) fn server_router(config: Arc<Config>) -> Router {
    Router::new()
        .route("/health", get(handle_health_request))
        .nest("/jobs", job_router(config.clone()))
        .nest("/offers", offer_router(config.clone()))
        .nest("/sweeper", sweeper_router(config))
        .fallback(handler_404)
}
