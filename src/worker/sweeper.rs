use std::time::Instant;

use chrono::{DateTime, SubsecRound, Utc};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::core::client::audit;
use crate::core::client::database::DatabaseError;
use crate::core::config::Config;
use crate::error::offer::OfferResult;
use crate::types::audit::{AuditEvent, AuditEventType};
use crate::types::constant::SYSTEM_ACTOR;
use crate::types::jobs::{JobItemUpdates, JobStatus};
use crate::types::offers::{OfferItem, OfferItemUpdates};
use crate::utils::metrics::DISPATCHER_METRICS;
use crate::worker::service::{EscalationOutcome, OfferService};

/// Aggregate result of one sweep tick, returned to the invoker for
/// observability.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct SweepStats {
    /// Offers this tick actually transitioned to `Expired`.
    pub processed: u64,
    /// Of those, how many produced a next-attempt offer.
    pub escalated: u64,
    /// Of those, how many ended in an administrator alert: ladder
    /// exhaustion, or an escalation that failed after the expiry committed.
    pub requires_admin: u64,
    pub errors: Vec<String>,
}

/// The only component allowed to transition `Open -> Expired`. Each
/// invocation is idempotent: offers another path resolved first fail their
/// open-status precondition and are skipped without side effects, so the
/// tick can be re-run or invoked concurrently without double-expiring or
/// double-escalating anything.
pub struct EscalationSweeper;

impl EscalationSweeper {
    /// One sweep tick: find open offers past their window, expire each in
    /// its own transaction, and drive the ladder forward. A failure on one
    /// offer is counted and logged, never aborts the rest of the batch.
    pub async fn process_expired_offers(config: &Config) -> SweepStats {
        let start = Instant::now();
        let as_of = Utc::now().round_subsecs(0);
        let mut stats = SweepStats::default();

        let batch = match config
            .database()
            .get_expired_offers(as_of, config.sweeper_params().batch_size)
            .await
        {
            Ok(batch) => batch,
            Err(e) => {
                error!(error = %e, "Failed to fetch expired offers, sweep tick abandoned");
                stats.errors.push(format!("fetch expired offers: {}", e));
                return stats;
            }
        };

        for offer in batch {
            let expired = match Self::expire_offer(config, &offer, as_of).await {
                Ok(Some(expired)) => expired,
                // Resolved by a racing accept/decline between the scan and
                // our transaction; already handled, nothing to do.
                Ok(None) => continue,
                Err(e) => {
                    warn!(offer_id = %offer.id, error = %e, "Failed to expire offer");
                    stats.errors.push(format!("offer {}: {}", offer.id, e));
                    continue;
                }
            };
            stats.processed += 1;

            match OfferService::escalate(config, &expired).await {
                Ok(EscalationOutcome::Escalated(_)) => stats.escalated += 1,
                Ok(EscalationOutcome::AdminAlerted) => stats.requires_admin += 1,
                // The expiry already committed; with no next offer the job
                // would strand Pending with nothing left to retry it, so
                // hand it to a human.
                Err(e) => {
                    warn!(offer_id = %expired.id, error = %e, "Escalation failed after expiry, alerting administrators");
                    OfferService::alert_admins(
                        config,
                        &expired,
                        "escalation failed after expiry, manual assignment required",
                    )
                    .await;
                    stats.requires_admin += 1;
                    stats.errors.push(format!("offer {}: {}", expired.id, e));
                }
            }
        }

        DISPATCHER_METRICS.sweep_response_time.record(start.elapsed().as_secs_f64(), &[]);
        info!(
            processed = stats.processed,
            escalated = stats.escalated,
            requires_admin = stats.requires_admin,
            errors = stats.errors.len(),
            "Sweep tick completed"
        );
        stats
    }

    /// Expires one offer. `Ok(None)` means the offer was no longer open
    /// when our transaction ran: whichever transition committed first won,
    /// and the loser exits as a no-op.
    async fn expire_offer(
        config: &Config,
        offer: &OfferItem,
        as_of: DateTime<Utc>,
    ) -> OfferResult<Option<OfferItem>> {
        let policy = config.ladder().policy_for(offer.attempt_number);
        let job_updates = JobItemUpdates::new().update_status(JobStatus::Pending).clear_active_offer();

        let expired = match config
            .database()
            .transition_offer(offer, OfferItemUpdates::expired(as_of), job_updates)
            .await
        {
            Ok(expired) => expired,
            Err(DatabaseError::PreconditionFailed(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        info!(
            offer_id = %expired.id,
            job_id = %expired.job_id,
            attempt = expired.attempt_number,
            will_escalate = !policy.is_terminal,
            "Offer expired"
        );
        audit::record(
            config.audit(),
            AuditEvent::new(
                AuditEventType::OfferExpired,
                expired.job_id,
                expired.id,
                expired.attempt_number,
                SYSTEM_ACTOR,
                Some(format!("will_escalate={}", !policy.is_terminal)),
            ),
        )
        .await;

        Ok(Some(expired))
    }
}
