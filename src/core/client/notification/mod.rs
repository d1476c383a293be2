pub mod error;
pub(crate) mod sns;

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::types::offers::OfferItem;
use crate::types::params::escalation::AudienceRule;
pub use error::NotificationError;

/// Which downstream message template the delivery layer should render.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum NotificationTemplate {
    /// A new offer is waiting for the audience to accept or decline.
    OfferAvailable,
    /// The escalation ladder is exhausted; a human must assign the job.
    EscalationExhausted,
}

/// One fire-and-forget message. The engine only ever sends these after the
/// corresponding state transition has committed, so a delivered
/// notification always refers to a real, durable offer.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub template: NotificationTemplate,
    pub audience: AudienceRule,
    pub job_id: Uuid,
    pub offer_id: Uuid,
    pub property_id: Uuid,
    pub required_role: String,
    pub attempt_number: u32,
}

impl Notification {
    pub fn offer_available(offer: &OfferItem) -> Self {
        Self {
            template: NotificationTemplate::OfferAvailable,
            audience: offer.audience,
            job_id: offer.job_id,
            offer_id: offer.id,
            property_id: offer.property_id,
            required_role: offer.required_role.clone(),
            attempt_number: offer.attempt_number,
        }
    }

    /// Admin alert referencing the last offer of an exhausted ladder.
    pub fn escalation_exhausted(offer: &OfferItem) -> Self {
        Self {
            template: NotificationTemplate::EscalationExhausted,
            audience: AudienceRule::Administrators,
            job_id: offer.job_id,
            offer_id: offer.id,
            property_id: offer.property_id,
            required_role: offer.required_role.clone(),
            attempt_number: offer.attempt_number,
        }
    }
}

/// NotificationClient trait. Delivery is best-effort: callers record
/// failures for observability and never roll back state over them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationClient: Send + Sync {
    /// send delivers one notification to its audience.
    async fn send(&self, notification: Notification) -> Result<(), NotificationError>;
}
