use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::offers::OfferItem;

/// Path parameter carrying an offer id.
#[derive(Deserialize)]
pub struct OfferId {
    pub id: String,
}

/// Path parameter carrying a job id.
#[derive(Deserialize)]
pub struct JobId {
    pub id: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct CreateOfferRequest {
    /// Who asked for this job to be dispatched; recorded in the audit trail.
    pub requested_by: Option<String>,
    pub priority: Option<String>,
    pub estimated_duration_minutes: Option<u64>,
    pub notes: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct AcceptOfferRequest {
    pub worker_id: String,
}

#[derive(Deserialize, Debug)]
pub struct DeclineOfferRequest {
    pub worker_id: String,
    pub reason: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct CancelOfferRequest {
    pub actor: String,
    pub reason: Option<String>,
}

/// Plain-JSON projection of an offer for API consumers.
#[derive(Serialize, Debug)]
pub struct OfferResponse {
    pub id: Uuid,
    pub job_id: Uuid,
    pub property_id: Uuid,
    pub required_role: String,
    pub attempt_number: u32,
    pub status: String,
    pub audience: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<&OfferItem> for OfferResponse {
    fn from(offer: &OfferItem) -> Self {
        Self {
            id: offer.id,
            job_id: offer.job_id,
            property_id: offer.property_id,
            required_role: offer.required_role.clone(),
            attempt_number: offer.attempt_number,
            status: offer.status.to_string(),
            audience: offer.audience.to_string(),
            expires_at: offer.expires_at,
            created_at: offer.created_at,
        }
    }
}

/// Standard response envelope for every route.
#[derive(Serialize, Deserialize)]
pub struct ApiResponse<T = ()> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiResponse<()> {
    pub fn error(message: String) -> Self {
        Self { success: false, data: None, message: Some(message) }
    }

    pub fn success(message: Option<String>) -> Self {
        Self { success: true, data: None, message }
    }
}

impl<T> ApiResponse<T> {
    pub fn success_with_data(data: T, message: Option<String>) -> Self {
        Self { success: true, data: Some(data), message }
    }
}
