use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::cli::escalation::EscalationCliArgs;

/// Who an attempt is fanned out to. Each rung of the ladder widens the
/// audience; `Administrators` is reserved for exhaustion alerts and never
/// receives offers.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum AudienceRule {
    /// The single best-matched worker for the role and property.
    BestMatchedWorker,
    /// Every qualified worker assigned to the property.
    PropertyQualified,
    /// Every qualified worker company-wide.
    CompanyQualified,
    /// The administrator group, alert template only.
    Administrators,
}

/// What the ladder prescribes for one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptPolicy {
    pub window: Duration,
    pub audience: AudienceRule,
    /// When true, this attempt's expiry ends the ladder: no further offer
    /// is created and the administrators are alerted instead.
    pub is_terminal: bool,
}

/// The escalation ladder as pure configuration. `policy_for` is total over
/// all attempts >= 1 and has no side effects, so it can be unit-tested
/// exhaustively and can never entangle policy with persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscalationLadder {
    pub max_attempts: u32,
    pub response_window: Duration,
}

impl Default for EscalationLadder {
    fn default() -> Self {
        Self { max_attempts: 3, response_window: Duration::minutes(5) }
    }
}

impl EscalationLadder {
    /// Maps a 1-based attempt number to its response window, audience and
    /// terminality. Attempts at or beyond `max_attempts` are terminal with
    /// the widest audience, so a corrupt attempt counter can never extend
    /// the ladder past its last rung.
    pub fn policy_for(&self, attempt_number: u32) -> AttemptPolicy {
        let audience = match attempt_number {
            0 | 1 => AudienceRule::BestMatchedWorker,
            2 => AudienceRule::PropertyQualified,
            _ => AudienceRule::CompanyQualified,
        };
        AttemptPolicy {
            window: self.response_window,
            audience,
            is_terminal: attempt_number >= self.max_attempts,
        }
    }
}

impl From<EscalationCliArgs> for EscalationLadder {
    fn from(args: EscalationCliArgs) -> Self {
        Self {
            max_attempts: args.max_attempts,
            response_window: Duration::seconds(args.response_window_secs as i64),
        }
    }
}
