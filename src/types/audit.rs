use chrono::{DateTime, SubsecRound, Utc};
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::constant::DISPATCHER_VERSION;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum AuditEventType {
    OfferCreated,
    OfferAccepted,
    OfferDeclined,
    OfferExpired,
    OfferEscalated,
    ManualOverride,
    AdminAlertRaised,
}

/// Immutable record of one state transition. Appended for every
/// transition, never mutated or deleted by the engine. Audit writes are
/// best-effort: a failed append is logged and the dispatch path moves on.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    pub id: Uuid,
    pub job_id: Uuid,
    pub offer_id: Uuid,
    pub event_type: AuditEventType,
    pub attempt_number: u32,
    /// Worker id, admin id, or a `system:` identity for sweeper actions.
    pub actor: String,
    /// Free-form context: decline reason, "ladder exhausted", etc.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub dispatcher_version: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub recorded_at: DateTime<Utc>,
}

impl AuditEvent {
    pub fn new(
        event_type: AuditEventType,
        job_id: Uuid,
        offer_id: Uuid,
        attempt_number: u32,
        actor: impl Into<String>,
        detail: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            job_id,
            offer_id,
            event_type,
            attempt_number,
            actor: actor.into(),
            detail,
            dispatcher_version: DISPATCHER_VERSION.to_string(),
            recorded_at: Utc::now().round_subsecs(0),
        }
    }
}
