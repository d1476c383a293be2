use chrono::Duration;
use rstest::rstest;

use crate::types::params::escalation::{AudienceRule, EscalationLadder};

#[rstest]
#[case(1, AudienceRule::BestMatchedWorker, false)]
#[case(2, AudienceRule::PropertyQualified, false)]
#[case(3, AudienceRule::CompanyQualified, true)]
#[case(4, AudienceRule::CompanyQualified, true)]
#[case(100, AudienceRule::CompanyQualified, true)]
fn default_ladder_maps_attempts(
    #[case] attempt: u32,
    #[case] audience: AudienceRule,
    #[case] is_terminal: bool,
) {
    let policy = EscalationLadder::default().policy_for(attempt);
    assert_eq!(policy.audience, audience);
    assert_eq!(policy.is_terminal, is_terminal);
}

#[rstest]
fn every_attempt_carries_the_configured_window() {
    let ladder = EscalationLadder { max_attempts: 3, response_window: Duration::seconds(90) };
    for attempt in 1..=10 {
        assert_eq!(ladder.policy_for(attempt).window, Duration::seconds(90));
    }
}

#[rstest]
fn extended_ladder_stays_company_wide_until_exhausted() {
    let ladder = EscalationLadder { max_attempts: 5, response_window: Duration::minutes(5) };

    let fourth = ladder.policy_for(4);
    assert_eq!(fourth.audience, AudienceRule::CompanyQualified);
    assert!(!fourth.is_terminal);

    let fifth = ladder.policy_for(5);
    assert_eq!(fifth.audience, AudienceRule::CompanyQualified);
    assert!(fifth.is_terminal);
}

#[rstest]
fn attempt_zero_is_clamped_to_the_first_rung() {
    // A corrupt counter below 1 must not widen the audience.
    let policy = EscalationLadder::default().policy_for(0);
    assert_eq!(policy.audience, AudienceRule::BestMatchedWorker);
    assert!(!policy.is_terminal);
}
