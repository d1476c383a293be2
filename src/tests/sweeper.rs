use rstest::rstest;

use crate::core::client::audit::MockAuditClient;
use crate::core::client::database::{DatabaseError, MockDatabaseClient};
use crate::core::client::notification::{MockNotificationClient, NotificationTemplate};
use crate::tests::config::TestConfigBuilder;
use crate::tests::utils::{build_expired_open_offer, build_job_item, resolved_offer};
use crate::types::audit::AuditEventType;
use crate::types::jobs::JobStatus;
use crate::types::offers::OfferStatus;
use crate::worker::sweeper::EscalationSweeper;

#[rstest]
#[tokio::test]
async fn sweep_expires_and_escalates_an_open_offer() {
    let mut job = build_job_item(JobStatus::Pending);
    let offer = build_expired_open_offer(&mut job, 1);
    let expired = resolved_offer(&offer, OfferStatus::Expired);
    let source_id = offer.id;

    let mut database = MockDatabaseClient::new();
    let batch = vec![offer.clone()];
    database.expect_get_expired_offers().times(1).returning(move |_, _| Ok(batch.clone()));
    let returned = expired.clone();
    database
        .expect_transition_offer()
        .withf(|_, offer_updates, job_updates| {
            offer_updates.status == OfferStatus::Expired
                && job_updates.status == Some(JobStatus::Pending)
                && job_updates.active_offer_id == Some(None)
        })
        .times(1)
        .returning(move |_, _, _| Ok(returned.clone()));

    let mut pending_job = job.clone();
    pending_job.status = JobStatus::Pending;
    pending_job.active_offer_id = None;
    database.expect_get_job_by_id().times(1).returning(move |_| Ok(Some(pending_job.clone())));
    database
        .expect_create_offer_for_job()
        .withf(move |next| next.attempt_number == 2 && next.metadata.escalated_from == Some(source_id))
        .times(1)
        .returning(Ok);

    let config = TestConfigBuilder::new().configure_database(database).build();

    let stats = EscalationSweeper::process_expired_offers(&config).await;
    assert_eq!(stats.processed, 1);
    assert_eq!(stats.escalated, 1);
    assert_eq!(stats.requires_admin, 0);
    assert!(stats.errors.is_empty());
}

#[rstest]
#[tokio::test]
async fn sweep_on_the_last_rung_alerts_instead_of_escalating() {
    let mut job = build_job_item(JobStatus::Pending);
    let offer = build_expired_open_offer(&mut job, 3);
    let expired = resolved_offer(&offer, OfferStatus::Expired);

    let mut database = MockDatabaseClient::new();
    let batch = vec![offer.clone()];
    database.expect_get_expired_offers().times(1).returning(move |_, _| Ok(batch.clone()));
    database.expect_transition_offer().times(1).returning(move |_, _, _| Ok(expired.clone()));
    // No create_offer_for_job expectation: the ladder must stop here.

    let mut notifier = MockNotificationClient::new();
    notifier
        .expect_send()
        .withf(|n| n.template == NotificationTemplate::EscalationExhausted)
        .times(1)
        .returning(|_| Ok(()));

    let config =
        TestConfigBuilder::new().configure_database(database).configure_notifier(notifier).build();

    let stats = EscalationSweeper::process_expired_offers(&config).await;
    assert_eq!(stats.processed, 1);
    assert_eq!(stats.escalated, 0);
    assert_eq!(stats.requires_admin, 1);
    assert!(stats.errors.is_empty());
}

#[rstest]
#[tokio::test]
async fn sweep_skips_offers_resolved_by_a_racing_writer() {
    let mut job = build_job_item(JobStatus::Pending);
    let offer = build_expired_open_offer(&mut job, 1);

    let mut database = MockDatabaseClient::new();
    let batch = vec![offer.clone()];
    database.expect_get_expired_offers().times(1).returning(move |_, _| Ok(batch.clone()));
    // A worker accepted between the scan and our transaction.
    database
        .expect_transition_offer()
        .times(1)
        .returning(|_, _, _| Err(DatabaseError::PreconditionFailed("offer no longer open".to_string())));

    let mut audit = MockAuditClient::new();
    // The skip leaves no trace: expiring never happened.
    audit
        .expect_append()
        .withf(|event| event.event_type == AuditEventType::OfferExpired)
        .times(0)
        .returning(|_| Ok(()));

    let config = TestConfigBuilder::new().configure_database(database).configure_audit(audit).build();

    let stats = EscalationSweeper::process_expired_offers(&config).await;
    assert_eq!(stats.processed, 0);
    assert_eq!(stats.escalated, 0);
    assert_eq!(stats.requires_admin, 0);
    assert!(stats.errors.is_empty());
}

#[rstest]
#[tokio::test]
async fn sweep_alerts_administrators_when_escalation_fails_after_expiry() {
    let mut job = build_job_item(JobStatus::Pending);
    let offer = build_expired_open_offer(&mut job, 1);
    let expired = resolved_offer(&offer, OfferStatus::Expired);

    let mut database = MockDatabaseClient::new();
    let batch = vec![offer.clone()];
    database.expect_get_expired_offers().times(1).returning(move |_, _| Ok(batch.clone()));
    database.expect_transition_offer().times(1).returning(move |_, _, _| Ok(expired.clone()));
    // The next-rung creation cannot even read the job back.
    database
        .expect_get_job_by_id()
        .times(1)
        .returning(|_| Err(DatabaseError::ConnectionError("primary stepped down".to_string())));

    let mut notifier = MockNotificationClient::new();
    notifier
        .expect_send()
        .withf(|n| n.template == NotificationTemplate::EscalationExhausted)
        .times(1)
        .returning(|_| Ok(()));

    let mut audit = MockAuditClient::new();
    audit
        .expect_append()
        .withf(|event| event.event_type == AuditEventType::OfferExpired)
        .times(1)
        .returning(|_| Ok(()));
    audit
        .expect_append()
        .withf(|event| event.event_type == AuditEventType::AdminAlertRaised)
        .times(1)
        .returning(|_| Ok(()));

    let config = TestConfigBuilder::new()
        .configure_database(database)
        .configure_notifier(notifier)
        .configure_audit(audit)
        .build();

    let stats = EscalationSweeper::process_expired_offers(&config).await;
    assert_eq!(stats.processed, 1);
    assert_eq!(stats.escalated, 0);
    assert_eq!(stats.requires_admin, 1);
    assert_eq!(stats.errors.len(), 1);
    assert!(stats.errors[0].contains(&offer.id.to_string()));
}

#[rstest]
#[tokio::test]
async fn sweep_counts_a_failing_offer_and_continues_the_batch() {
    let mut job_a = build_job_item(JobStatus::Pending);
    let failing = build_expired_open_offer(&mut job_a, 3);
    let mut job_b = build_job_item(JobStatus::Pending);
    let healthy = build_expired_open_offer(&mut job_b, 3);
    let healthy_expired = resolved_offer(&healthy, OfferStatus::Expired);

    let mut database = MockDatabaseClient::new();
    let batch = vec![failing.clone(), healthy.clone()];
    database.expect_get_expired_offers().times(1).returning(move |_, _| Ok(batch.clone()));
    let failing_id = failing.id;
    database
        .expect_transition_offer()
        .withf(move |current, _, _| current.id == failing_id)
        .times(1)
        .returning(|_, _, _| Err(DatabaseError::ConnectionError("write concern timeout".to_string())));
    let healthy_id = healthy.id;
    database
        .expect_transition_offer()
        .withf(move |current, _, _| current.id == healthy_id)
        .times(1)
        .returning(move |_, _, _| Ok(healthy_expired.clone()));

    let config = TestConfigBuilder::new().configure_database(database).build();

    let stats = EscalationSweeper::process_expired_offers(&config).await;
    assert_eq!(stats.processed, 1);
    assert_eq!(stats.requires_admin, 1);
    assert_eq!(stats.errors.len(), 1);
    assert!(stats.errors[0].contains(&failing_id.to_string()));
}

#[rstest]
#[tokio::test]
async fn sweep_abandons_the_tick_when_the_scan_fails() {
    let mut database = MockDatabaseClient::new();
    database
        .expect_get_expired_offers()
        .times(1)
        .returning(|_, _| Err(DatabaseError::ConnectionError("primary stepped down".to_string())));

    let config = TestConfigBuilder::new().configure_database(database).build();

    let stats = EscalationSweeper::process_expired_offers(&config).await;
    assert_eq!(stats.processed, 0);
    assert_eq!(stats.errors.len(), 1);
}

#[rstest]
#[tokio::test]
async fn sweep_with_nothing_expired_is_a_no_op() {
    let mut database = MockDatabaseClient::new();
    database.expect_get_expired_offers().times(1).returning(|_, _| Ok(Vec::new()));

    let config = TestConfigBuilder::new().configure_database(database).build();

    let stats = EscalationSweeper::process_expired_offers(&config).await;
    assert_eq!(stats, Default::default());
}
