pub mod error;
pub(crate) mod mongo;

use async_trait::async_trait;
use tracing::warn;

use crate::types::audit::AuditEvent;
pub use error::AuditError;

/// AuditClient trait. Events are append-only; nothing in the engine ever
/// reads them back, mutates them or deletes them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuditClient: Send + Sync {
    /// append writes one event to the audit trail.
    async fn append(&self, event: AuditEvent) -> Result<(), AuditError>;
}

/// Best-effort append used on the dispatch path. Audit completeness is not
/// a correctness requirement, so a failed write is logged and swallowed
/// rather than allowed to block or fail the offer transition it describes.
pub async fn record(client: &dyn AuditClient, event: AuditEvent) {
    let event_type = event.event_type;
    let offer_id = event.offer_id;
    if let Err(e) = client.append(event).await {
        warn!(%offer_id, %event_type, error = %e, "Failed to append audit event");
    }
}
