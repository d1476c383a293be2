use chrono::{DateTime, Duration, SubsecRound, Utc};
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::datetime::optional_chrono_datetime_as_bson_datetime;
use crate::types::jobs::JobItem;
use crate::types::params::escalation::AudienceRule;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum OfferStatus {
    /// Waiting for a worker response, the only non-terminal state
    Open,
    /// A worker claimed the job
    Accepted,
    /// The offered worker turned the job down
    Declined,
    /// The response window elapsed before anyone answered
    Expired,
    /// Administrative abort, used when the underlying job is cancelled
    Cancelled,
}

impl OfferStatus {
    /// Every state except `Open` is terminal and write-once.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, OfferStatus::Open)
    }
}

/// Free-form context carried along the escalation lineage of a job.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct OfferMetadata {
    /// Original priority set by whoever created the job.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_duration_minutes: Option<u64>,
    /// The offer this one was escalated from, `None` on attempt 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escalated_from: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl OfferMetadata {
    /// Context for the next rung of the ladder: same caller-supplied
    /// fields, lineage pointer moved to the offer being escalated.
    pub fn escalated(&self, source_offer_id: Uuid) -> Self {
        Self { escalated_from: Some(source_offer_id), ..self.clone() }
    }
}

/// A time-boxed proposal of one job to a worker audience. Offers are never
/// deleted; terminal offers stay behind as the audit and analytics trail.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OfferItem {
    pub id: Uuid,
    pub job_id: Uuid,
    pub property_id: Uuid,
    pub required_role: String,
    /// 1-based, strictly increasing along a job's escalation lineage.
    pub attempt_number: u32,
    pub status: OfferStatus,
    /// Who this attempt was fanned out to, per the escalation ladder.
    pub audience: AudienceRule,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declined_by: Option<String>,
    /// Decline or cancellation reason, recorded verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution_note: Option<String>,
    /// For cancellations: who pulled the offer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_by_actor: Option<String>,
    pub metadata: OfferMetadata,
    /// Optimistic-concurrency guard, incremented on every update.
    pub version: i32,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    /// Declarative timeout: the sweep discovers and expires offers past
    /// this instant. No in-process timers exist anywhere.
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub expires_at: DateTime<Utc>,
    #[serde(default, with = "optional_chrono_datetime_as_bson_datetime")]
    pub responded_at: Option<DateTime<Utc>>,
    #[serde(default, with = "optional_chrono_datetime_as_bson_datetime")]
    pub expired_at: Option<DateTime<Utc>>,
    #[serde(default, with = "optional_chrono_datetime_as_bson_datetime")]
    pub cancelled_at: Option<DateTime<Utc>>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl OfferItem {
    /// Builds an `Open` offer for `job` with a response window starting now.
    /// Mongo datetimes carry millisecond precision, so timestamps are
    /// rounded to whole seconds the way the rest of the documents are.
    pub fn new(
        job: &JobItem,
        attempt_number: u32,
        audience: AudienceRule,
        window: Duration,
        metadata: OfferMetadata,
    ) -> Self {
        let now = Utc::now().round_subsecs(0);
        Self {
            id: Uuid::new_v4(),
            job_id: job.id,
            property_id: job.property_id,
            required_role: job.required_role.clone(),
            attempt_number,
            status: OfferStatus::Open,
            audience,
            accepted_by: None,
            declined_by: None,
            resolution_note: None,
            resolved_by_actor: None,
            metadata,
            version: 0,
            created_at: now,
            expires_at: now + window,
            responded_at: None,
            expired_at: None,
            cancelled_at: None,
            updated_at: now,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == OfferStatus::Open
    }
}
