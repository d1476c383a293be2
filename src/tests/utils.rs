use chrono::{Duration, SubsecRound, Utc};
use uuid::Uuid;

use crate::types::jobs::{JobItem, JobStatus};
use crate::types::offers::{OfferItem, OfferMetadata, OfferStatus};
use crate::types::params::escalation::EscalationLadder;

pub fn build_job_item(status: JobStatus) -> JobItem {
    let mut job = JobItem::new(Uuid::new_v4(), "cleaner".to_string());
    job.status = status;
    job
}

/// An `Open` offer for `job` at `attempt`, already pointed at by the job.
pub fn build_open_offer(job: &mut JobItem, attempt: u32) -> OfferItem {
    let ladder = EscalationLadder::default();
    let policy = ladder.policy_for(attempt);
    let offer = OfferItem::new(job, attempt, policy.audience, policy.window, OfferMetadata::default());
    job.status = JobStatus::Offered;
    job.active_offer_id = Some(offer.id);
    offer
}

/// Same as [`build_open_offer`] but with `expires_at` already in the past,
/// ready to be picked up by a sweep.
pub fn build_expired_open_offer(job: &mut JobItem, attempt: u32) -> OfferItem {
    let mut offer = build_open_offer(job, attempt);
    offer.expires_at = Utc::now().round_subsecs(0) - Duration::minutes(1);
    offer
}

/// The terminal shape `transition_offer` would hand back for `updates`.
pub fn resolved_offer(offer: &OfferItem, status: OfferStatus) -> OfferItem {
    let mut resolved = offer.clone();
    resolved.status = status;
    resolved.version += 1;
    resolved
}
