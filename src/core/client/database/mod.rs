pub mod error;
pub mod mongodb;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::types::jobs::{JobItem, JobItemUpdates};
use crate::types::offers::{OfferItem, OfferItemUpdates};
pub use error::DatabaseError;

/// Trait defining the transactional offer-store operations. Every method
/// that touches both an offer and its parent job commits the pair in one
/// atomic transaction; the caller never gets to write one side alone.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Inserts `offer` and points its job at it, atomically. Inside the
    /// transaction the job is re-read and its `active_offer_id` must be
    /// empty or refer to a non-open offer; otherwise
    /// `DatabaseError::ActiveOfferExists` is returned and nothing is
    /// written. The job moves to `Offered`.
    async fn create_offer_for_job(&self, offer: OfferItem) -> Result<OfferItem, DatabaseError>;

    /// get_offer_by_id - Get an offer by its ID
    async fn get_offer_by_id(&self, id: Uuid) -> Result<Option<OfferItem>, DatabaseError>;

    /// get_job_by_id - Get a job by its ID
    async fn get_job_by_id(&self, id: Uuid) -> Result<Option<JobItem>, DatabaseError>;

    /// All offers with `status = Open` and `expires_at <= as_of`, oldest
    /// first, bounded by `limit`. Used exclusively by the sweeper.
    async fn get_expired_offers(
        &self,
        as_of: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<OfferItem>, DatabaseError>;

    /// Applies one terminal transition to `current_offer` and the paired
    /// update to its job, atomically. The offer write is filtered on
    /// `{id, status: Open, version}`: if another writer resolved the offer
    /// first, the filter matches nothing and the method returns
    /// `DatabaseError::PreconditionFailed` without touching the job. This
    /// is the single code path every accept/decline/cancel/expire goes
    /// through.
    async fn transition_offer(
        &self,
        current_offer: &OfferItem,
        offer_updates: OfferItemUpdates,
        job_updates: JobItemUpdates,
    ) -> Result<OfferItem, DatabaseError>;
}
