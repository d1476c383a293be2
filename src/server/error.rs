use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::types::ApiResponse;
use crate::error::offer::OfferError;

pub type OfferRouteResult = Result<Response, OfferRouteError>;

/// Errors surfaced by the HTTP layer. Each variant maps to a status code;
/// the body always carries the `ApiResponse` envelope.
#[derive(Debug, thiserror::Error)]
pub enum OfferRouteError {
    /// The path parameter is not a valid UUID
    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Someone else claimed or resolved the offer first
    #[error("{0}")]
    AlreadyTaken(String),

    /// An open offer already exists for the job
    #[error("{0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<OfferError> for OfferRouteError {
    fn from(e: OfferError) -> Self {
        match e {
            OfferError::OfferNotFound { id } => OfferRouteError::NotFound(format!("offer {}", id)),
            OfferError::JobNotFound { id } => OfferRouteError::NotFound(format!("job {}", id)),
            OfferError::AlreadyResolved { .. } => {
                OfferRouteError::AlreadyTaken("This job was already taken".to_string())
            }
            OfferError::Conflict { job_id } => {
                OfferRouteError::Conflict(format!("Job {} already has an open offer", job_id))
            }
            OfferError::DatabaseError(e) => OfferRouteError::InternalError(e.to_string()),
        }
    }
}

impl IntoResponse for OfferRouteError {
    fn into_response(self) -> Response {
        let status = match &self {
            OfferRouteError::InvalidId(_) => StatusCode::BAD_REQUEST,
            OfferRouteError::NotFound(_) => StatusCode::NOT_FOUND,
            OfferRouteError::AlreadyTaken(_) | OfferRouteError::Conflict(_) => StatusCode::CONFLICT,
            OfferRouteError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(ApiResponse::error(self.to_string()))).into_response()
    }
}
