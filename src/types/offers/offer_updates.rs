use chrono::{DateTime, Utc};

use crate::types::offers::offer_item::OfferStatus;

/// The changes a single offer transition is allowed to make. Identity,
/// lineage and temporal-creation fields are immutable; `version` and
/// `updated_at` are bumped by the store on every write.
///
/// Every constructor targets a terminal status: `Open` is entered only at
/// creation, so there is deliberately no way to build an update that sets
/// an offer back to `Open`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferItemUpdates {
    pub status: OfferStatus,
    pub accepted_by: Option<String>,
    pub declined_by: Option<String>,
    pub responded_at: Option<DateTime<Utc>>,
    pub expired_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    /// Decline reason or cancellation reason, recorded verbatim.
    pub resolution_note: Option<String>,
    /// For cancellations: who pulled the offer.
    pub resolved_by_actor: Option<String>,
}

impl OfferItemUpdates {
    pub fn accepted(worker_id: &str, at: DateTime<Utc>) -> Self {
        Self {
            status: OfferStatus::Accepted,
            accepted_by: Some(worker_id.to_string()),
            declined_by: None,
            responded_at: Some(at),
            expired_at: None,
            cancelled_at: None,
            resolution_note: None,
            resolved_by_actor: None,
        }
    }

    pub fn declined(worker_id: &str, reason: Option<String>, at: DateTime<Utc>) -> Self {
        Self {
            status: OfferStatus::Declined,
            accepted_by: None,
            declined_by: Some(worker_id.to_string()),
            responded_at: Some(at),
            expired_at: None,
            cancelled_at: None,
            resolution_note: reason,
            resolved_by_actor: None,
        }
    }

    pub fn expired(at: DateTime<Utc>) -> Self {
        Self {
            status: OfferStatus::Expired,
            accepted_by: None,
            declined_by: None,
            responded_at: None,
            expired_at: Some(at),
            cancelled_at: None,
            resolution_note: None,
            resolved_by_actor: None,
        }
    }

    pub fn cancelled(actor: &str, reason: Option<String>, at: DateTime<Utc>) -> Self {
        Self {
            status: OfferStatus::Cancelled,
            accepted_by: None,
            declined_by: None,
            responded_at: None,
            expired_at: None,
            cancelled_at: Some(at),
            resolution_note: reason,
            resolved_by_actor: Some(actor.to_string()),
        }
    }
}
