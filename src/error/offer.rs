use thiserror::Error;
use uuid::Uuid;

use crate::core::client::database::DatabaseError;

pub type OfferResult<T> = Result<T, OfferError>;

/// Error taxonomy for offer operations. Expected business conditions
/// (conflict, already resolved) are variants here, never panics, so
/// nothing escapes the engine boundary as an exception.
#[derive(Error, Debug)]
pub enum OfferError {
    /// Optimistic-concurrency collision creating an offer: another writer
    /// set the job's active offer first. Bounded retries already happened;
    /// the caller may surface "offer no longer available".
    #[error("Job {job_id} already has an open offer")]
    Conflict { job_id: Uuid },

    /// The operation targeted a non-open offer (double accept, accept
    /// after expiry). A benign idempotent no-op from the caller's
    /// perspective, surfaced as "this job was already taken".
    #[error("Offer {id} was already resolved to {status}")]
    AlreadyResolved { id: Uuid, status: String },

    /// The referenced offer does not exist.
    #[error("Failed to find offer with id {id}")]
    OfferNotFound { id: Uuid },

    /// The referenced job does not exist.
    #[error("Failed to find job with id {id}")]
    JobNotFound { id: Uuid },

    /// Transient or unexpected store failure. Interactive callers retry
    /// with backoff; the sweeper logs, counts and moves to the next item.
    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),
}
