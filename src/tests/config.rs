use crate::core::client::audit::{AuditClient, MockAuditClient};
use crate::core::client::database::{DatabaseClient, MockDatabaseClient};
use crate::core::client::notification::{MockNotificationClient, NotificationClient};
use crate::core::config::Config;
use crate::types::params::escalation::EscalationLadder;
use crate::types::params::{ServerParams, SweeperParams};

/// Assembles a [`Config`] out of mocked collaborators. Unconfigured
/// notifier/audit mocks default to permissive (accept anything, succeed);
/// an unconfigured database mock panics on first use, which is what a test
/// that forgot to stub the store deserves.
pub struct TestConfigBuilder {
    database: Option<Box<dyn DatabaseClient>>,
    notifier: Option<Box<dyn NotificationClient>>,
    audit: Option<Box<dyn AuditClient>>,
    ladder: EscalationLadder,
    sweeper_params: SweeperParams,
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        Self {
            database: None,
            notifier: None,
            audit: None,
            ladder: EscalationLadder::default(),
            sweeper_params: SweeperParams { interval_secs: 60, batch_size: 100 },
        }
    }

    pub fn configure_database(mut self, database: MockDatabaseClient) -> Self {
        self.database = Some(Box::new(database));
        self
    }

    pub fn configure_notifier(mut self, notifier: MockNotificationClient) -> Self {
        self.notifier = Some(Box::new(notifier));
        self
    }

    pub fn configure_audit(mut self, audit: MockAuditClient) -> Self {
        self.audit = Some(Box::new(audit));
        self
    }

    pub fn configure_ladder(mut self, ladder: EscalationLadder) -> Self {
        self.ladder = ladder;
        self
    }

    pub fn build(self) -> Config {
        let database = self.database.unwrap_or_else(|| Box::new(MockDatabaseClient::new()));
        let notifier = self.notifier.unwrap_or_else(|| {
            let mut mock = MockNotificationClient::new();
            mock.expect_send().returning(|_| Ok(()));
            Box::new(mock)
        });
        let audit = self.audit.unwrap_or_else(|| {
            let mut mock = MockAuditClient::new();
            mock.expect_append().returning(|_| Ok(()));
            Box::new(mock)
        });

        Config::new(
            ServerParams { host: "127.0.0.1".to_string(), port: 0 },
            self.sweeper_params,
            self.ladder,
            database,
            notifier,
            audit,
        )
    }
}
