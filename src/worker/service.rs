use chrono::{SubsecRound, Utc};
use opentelemetry::KeyValue;
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::client::audit;
use crate::core::client::database::DatabaseError;
use crate::core::client::notification::Notification;
use crate::core::config::Config;
use crate::error::offer::{OfferError, OfferResult};
use crate::types::audit::{AuditEvent, AuditEventType};
use crate::types::constant::{MAX_CREATE_RETRIES, SYSTEM_ACTOR};
use crate::types::jobs::{JobItemUpdates, JobStatus};
use crate::types::offers::{OfferItem, OfferItemUpdates, OfferMetadata};
use crate::utils::metrics::DISPATCHER_METRICS;

/// What an escalation step decided: either the next rung's offer now
/// exists, or the ladder is exhausted and the administrators were alerted.
#[derive(Debug)]
pub enum EscalationOutcome {
    Escalated(OfferItem),
    AdminAlerted,
}

/// Sole authority over the offer lifecycle. Every mutation goes through
/// the store's transactional path; audit events and notifications are
/// emitted strictly after the transition committed.
pub struct OfferService;

impl OfferService {
    /// Creates an offer for `job_id` at `attempt_number`, with window and
    /// audience from the escalation ladder. Version races on the job are
    /// retried a bounded number of times; a genuinely open concurrent
    /// offer surfaces as `OfferError::Conflict`.
    pub async fn create_offer(
        config: &Config,
        job_id: Uuid,
        attempt_number: u32,
        metadata: OfferMetadata,
        actor: &str,
    ) -> OfferResult<OfferItem> {
        let policy = config.ladder().policy_for(attempt_number);

        for attempt in 0..MAX_CREATE_RETRIES {
            let job = config
                .database()
                .get_job_by_id(job_id)
                .await?
                .ok_or(OfferError::JobNotFound { id: job_id })?;

            let offer =
                OfferItem::new(&job, attempt_number, policy.audience, policy.window, metadata.clone());

            match config.database().create_offer_for_job(offer).await {
                Ok(offer) => {
                    info!(
                        offer_id = %offer.id,
                        job_id = %job_id,
                        attempt = attempt_number,
                        audience = %offer.audience,
                        "Offer created"
                    );
                    audit::record(
                        config.audit(),
                        AuditEvent::new(
                            AuditEventType::OfferCreated,
                            job_id,
                            offer.id,
                            attempt_number,
                            actor,
                            None,
                        ),
                    )
                    .await;
                    Self::notify(config, Notification::offer_available(&offer)).await;
                    Self::record_operation(true, "create_offer");
                    return Ok(offer);
                }
                Err(DatabaseError::ActiveOfferExists { .. }) => {
                    Self::record_operation(false, "create_offer");
                    return Err(OfferError::Conflict { job_id });
                }
                Err(DatabaseError::PreconditionFailed(reason)) => {
                    // Job version moved under us; re-read and try again.
                    warn!(job_id = %job_id, attempt = attempt + 1, %reason, "Retrying offer creation");
                    continue;
                }
                Err(e) => {
                    Self::record_operation(false, "create_offer");
                    return Err(e.into());
                }
            }
        }

        Self::record_operation(false, "create_offer");
        Err(OfferError::Conflict { job_id })
    }

    /// `Open -> Accepted`; the job becomes `Assigned` and its active
    /// pointer is cleared in the same transaction. A losing racer gets
    /// `AlreadyResolved`, never a corrupted double acceptance.
    pub async fn accept_offer(config: &Config, offer_id: Uuid, worker_id: &str) -> OfferResult<OfferItem> {
        let now = Utc::now().round_subsecs(0);
        let offer = Self::resolve_open_offer(
            config,
            offer_id,
            OfferItemUpdates::accepted(worker_id, now),
            JobItemUpdates::new().update_status(JobStatus::Assigned).clear_active_offer(),
        )
        .await?;

        info!(offer_id = %offer.id, job_id = %offer.job_id, worker_id, "Offer accepted");
        audit::record(
            config.audit(),
            AuditEvent::new(
                AuditEventType::OfferAccepted,
                offer.job_id,
                offer.id,
                offer.attempt_number,
                worker_id,
                None,
            ),
        )
        .await;
        Self::record_operation(true, "accept_offer");
        Ok(offer)
    }

    /// `Open -> Declined`; the job falls back to `Pending`. A decline is
    /// functionally an early expiry, so the next ladder step runs
    /// synchronously here instead of waiting for the sweep (which
    /// tolerates finding the offer already terminal).
    pub async fn decline_offer(
        config: &Config,
        offer_id: Uuid,
        worker_id: &str,
        reason: Option<String>,
    ) -> OfferResult<EscalationOutcome> {
        let now = Utc::now().round_subsecs(0);
        let offer = Self::resolve_open_offer(
            config,
            offer_id,
            OfferItemUpdates::declined(worker_id, reason.clone(), now),
            JobItemUpdates::new().update_status(JobStatus::Pending).clear_active_offer(),
        )
        .await?;

        info!(offer_id = %offer.id, job_id = %offer.job_id, worker_id, "Offer declined");
        audit::record(
            config.audit(),
            AuditEvent::new(
                AuditEventType::OfferDeclined,
                offer.job_id,
                offer.id,
                offer.attempt_number,
                worker_id,
                reason,
            ),
        )
        .await;
        Self::record_operation(true, "decline_offer");

        Self::escalate(config, &offer).await
    }

    /// Administrative abort, valid from `Open` only; used when the
    /// underlying job is cancelled. The same transaction cancels the job
    /// and clears its pointer, so a notified worker can never accept a
    /// job that was just pulled.
    pub async fn cancel_offer(
        config: &Config,
        offer_id: Uuid,
        actor: &str,
        reason: Option<String>,
    ) -> OfferResult<OfferItem> {
        let now = Utc::now().round_subsecs(0);
        let offer = Self::resolve_open_offer(
            config,
            offer_id,
            OfferItemUpdates::cancelled(actor, reason.clone(), now),
            JobItemUpdates::new().update_status(JobStatus::Cancelled).clear_active_offer(),
        )
        .await?;

        info!(offer_id = %offer.id, job_id = %offer.job_id, actor, "Offer cancelled");
        audit::record(
            config.audit(),
            AuditEvent::new(
                AuditEventType::ManualOverride,
                offer.job_id,
                offer.id,
                offer.attempt_number,
                actor,
                reason,
            ),
        )
        .await;
        Self::record_operation(true, "cancel_offer");
        Ok(offer)
    }

    /// The one escalation routine, shared by the synchronous decline path
    /// and the sweeper so both converge on identical ladder behavior.
    /// `source_offer` must already be terminal when this is called.
    pub async fn escalate(config: &Config, source_offer: &OfferItem) -> OfferResult<EscalationOutcome> {
        let policy = config.ladder().policy_for(source_offer.attempt_number);

        if !policy.is_terminal {
            let next_attempt = source_offer.attempt_number + 1;
            let next = Self::create_offer(
                config,
                source_offer.job_id,
                next_attempt,
                source_offer.metadata.escalated(source_offer.id),
                SYSTEM_ACTOR,
            )
            .await?;

            audit::record(
                config.audit(),
                AuditEvent::new(
                    AuditEventType::OfferEscalated,
                    next.job_id,
                    next.id,
                    next.attempt_number,
                    SYSTEM_ACTOR,
                    Some(format!("escalated from offer {}", source_offer.id)),
                ),
            )
            .await;
            DISPATCHER_METRICS.offers_escalated.add(1, &[]);
            info!(
                job_id = %next.job_id,
                from_offer = %source_offer.id,
                to_offer = %next.id,
                attempt = next.attempt_number,
                "Offer escalated"
            );
            return Ok(EscalationOutcome::Escalated(next));
        }

        // Ladder exhausted: no further offer. The job stays Pending until
        // a human assigns it.
        Self::alert_admins(config, source_offer, "escalation ladder exhausted, manual assignment required")
            .await;
        Ok(EscalationOutcome::AdminAlerted)
    }

    /// Raises the administrator alert for `source_offer`'s job:
    /// exhaustion notification plus audit event, both best-effort. Shared
    /// by the terminal rung of the ladder and the sweeper's fallback for
    /// an escalation that failed after its expiry already committed.
    pub(crate) async fn alert_admins(config: &Config, source_offer: &OfferItem, detail: &str) {
        Self::notify(config, Notification::escalation_exhausted(source_offer)).await;
        audit::record(
            config.audit(),
            AuditEvent::new(
                AuditEventType::AdminAlertRaised,
                source_offer.job_id,
                source_offer.id,
                source_offer.attempt_number,
                SYSTEM_ACTOR,
                Some(detail.to_string()),
            ),
        )
        .await;
        DISPATCHER_METRICS.admin_alerts_raised.add(1, &[]);
        warn!(
            job_id = %source_offer.job_id,
            offer_id = %source_offer.id,
            attempt = source_offer.attempt_number,
            detail,
            "Administrator alerted, manual assignment required"
        );
    }

    /// Loads the offer, validates it is still open, and applies the
    /// terminal transition through the store's atomic path. A losing race
    /// (the offer resolved between our read and our write) comes back as
    /// `AlreadyResolved`, matching the pre-check, so callers see one
    /// consistent error either way.
    async fn resolve_open_offer(
        config: &Config,
        offer_id: Uuid,
        offer_updates: OfferItemUpdates,
        job_updates: JobItemUpdates,
    ) -> OfferResult<OfferItem> {
        let offer = config
            .database()
            .get_offer_by_id(offer_id)
            .await?
            .ok_or(OfferError::OfferNotFound { id: offer_id })?;

        if !offer.is_open() {
            return Err(OfferError::AlreadyResolved { id: offer_id, status: offer.status.to_string() });
        }

        match config.database().transition_offer(&offer, offer_updates, job_updates).await {
            Ok(updated) => Ok(updated),
            Err(DatabaseError::PreconditionFailed(_)) => {
                Err(Self::already_resolved(config, offer_id).await)
            }
            Err(e) => {
                Self::record_operation(false, "transition_offer");
                Err(e.into())
            }
        }
    }

    /// Builds the `AlreadyResolved` error with the offer's current status
    /// when it can still be read, so the caller's message names the state
    /// that won the race.
    async fn already_resolved(config: &Config, offer_id: Uuid) -> OfferError {
        let status = match config.database().get_offer_by_id(offer_id).await {
            Ok(Some(offer)) => offer.status.to_string(),
            _ => "resolved".to_string(),
        };
        OfferError::AlreadyResolved { id: offer_id, status }
    }

    /// Fire-and-forget delivery. A lost notification degrades to a slower
    /// human fallback (the window expires and the ladder moves on); it is
    /// recorded for observability and never propagated.
    async fn notify(config: &Config, notification: Notification) {
        let template = notification.template;
        if let Err(e) = config.notifier().send(notification).await {
            warn!(%template, error = %e, "Failed to deliver notification");
            DISPATCHER_METRICS
                .notification_failures
                .add(1, &[KeyValue::new("template", template.to_string())]);
        }
    }

    fn record_operation(success: bool, operation: &'static str) {
        let attributes = [KeyValue::new("operation_type", operation)];
        if success {
            DISPATCHER_METRICS.successful_offer_operations.add(1, &attributes);
        } else {
            DISPATCHER_METRICS.failed_offer_operations.add(1, &attributes);
        }
    }
}
