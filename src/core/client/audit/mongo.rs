use std::sync::Arc;

use async_trait::async_trait;
use mongodb::{Collection, Database};

use super::{AuditClient, AuditError};
use crate::types::audit::AuditEvent;
use crate::types::constant::AUDIT_EVENTS_COLLECTION;

/// Append-only audit trail in the same MongoDB database as the offers.
/// Deliberately not part of the offer transactions: a slow or failing
/// audit write must never hold up a transition.
pub struct MongoAuditClient {
    database: Arc<Database>,
}

impl MongoAuditClient {
    pub fn new(database: Arc<Database>) -> Self {
        Self { database }
    }

    fn get_collection(&self) -> Collection<AuditEvent> {
        self.database.collection(AUDIT_EVENTS_COLLECTION)
    }
}

#[async_trait]
impl AuditClient for MongoAuditClient {
    async fn append(&self, event: AuditEvent) -> Result<(), AuditError> {
        self.get_collection().insert_one(event, None).await?;
        Ok(())
    }
}
