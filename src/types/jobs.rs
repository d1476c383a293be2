use chrono::{DateTime, SubsecRound, Utc};
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, strum_macros::Display)]
pub enum JobStatus {
    /// The job needs an assignee and has no live offer out
    Pending,
    /// An open offer is out for this job
    Offered,
    /// A worker accepted an offer for this job
    Assigned,
    /// Work is done, kept for history
    Completed,
    /// The job was aborted
    Cancelled,
}

/// A unit of operational work (e.g. "clean Villa X at 14:00"). The wider
/// application owns most of the job document; the dispatch engine mutates
/// only `status` and `active_offer_id`, always in the same transaction as
/// the offer it is pairing the job with.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct JobItem {
    pub id: Uuid,
    /// Locality context used to scope the escalation audience.
    pub property_id: Uuid,
    /// Skill tag a worker must carry to receive offers for this job.
    pub required_role: String,
    pub status: JobStatus,
    /// The at-most-one currently open offer for this job. The invariant
    /// "exactly one open offer per job" hangs off this pointer.
    pub active_offer_id: Option<Uuid>,
    /// Optimistic-concurrency guard, incremented on every update.
    pub version: i32,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl JobItem {
    pub fn new(property_id: Uuid, required_role: String) -> Self {
        let now = Utc::now().round_subsecs(0);
        Self {
            id: Uuid::new_v4(),
            property_id,
            required_role,
            status: JobStatus::Pending,
            active_offer_id: None,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Changes to apply to a job document. `id`, `created_at` and ownership
/// fields are not touchable from the dispatch engine; `version` and
/// `updated_at` are bumped by the store on every write.
///
/// `active_offer_id` is double-optional: the outer `None` means "leave the
/// pointer alone", `Some(None)` clears it, `Some(Some(id))` repoints it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobItemUpdates {
    pub status: Option<JobStatus>,
    pub active_offer_id: Option<Option<Uuid>>,
}

impl JobItemUpdates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_status(mut self, status: JobStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn set_active_offer(mut self, offer_id: Uuid) -> Self {
        self.active_offer_id = Some(Some(offer_id));
        self
    }

    pub fn clear_active_offer(mut self) -> Self {
        self.active_offer_id = Some(None);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.active_offer_id.is_none()
    }
}
