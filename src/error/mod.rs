pub mod offer;

use thiserror::Error;

use crate::core::client::audit::AuditError;
use crate::core::client::database::DatabaseError;
use crate::core::client::notification::NotificationError;
pub use offer::{OfferError, OfferResult};

/// Result type for dispatcher bootstrap and infrastructure operations
pub type DispatcherResult<T> = Result<T, DispatcherError>;

/// Error types for the dispatcher service itself (wiring, server, worker
/// lifecycle). Offer-level business failures live in [`OfferError`].
#[derive(Error, Debug)]
pub enum DispatcherError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),

    #[error("Notification error: {0}")]
    NotificationError(#[from] NotificationError),

    #[error("Audit error: {0}")]
    AuditError(#[from] AuditError),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Worker error: {0}")]
    WorkerError(String),

    #[error("Dispatcher error: {0}")]
    Other(#[from] anyhow::Error),
}
