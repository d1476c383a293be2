use std::sync::Arc;

use aws_config::BehaviorVersion;

use crate::cli::RunCmd;
use crate::core::client::audit::mongo::MongoAuditClient;
use crate::core::client::database::mongodb::MongoDbClient;
use crate::core::client::notification::sns::SNS;
use crate::core::client::{AuditClient, DatabaseClient, NotificationClient};
use crate::error::DispatcherResult;
use crate::types::params::escalation::EscalationLadder;
use crate::types::params::{DatabaseArgs, NotificationArgs, ServerParams, SweeperParams};

/// Shared application state: validated parameters plus the three external
/// collaborators behind trait objects, so tests can swap in mocks.
pub struct Config {
    server_params: ServerParams,
    sweeper_params: SweeperParams,
    ladder: EscalationLadder,
    database: Box<dyn DatabaseClient>,
    notifier: Box<dyn NotificationClient>,
    audit: Box<dyn AuditClient>,
}

impl Config {
    pub fn new(
        server_params: ServerParams,
        sweeper_params: SweeperParams,
        ladder: EscalationLadder,
        database: Box<dyn DatabaseClient>,
        notifier: Box<dyn NotificationClient>,
        audit: Box<dyn AuditClient>,
    ) -> Self {
        Self { server_params, sweeper_params, ladder, database, notifier, audit }
    }

    /// Builds the production wiring from CLI/env arguments: MongoDB for
    /// offers, jobs and the audit trail, SNS for notifications.
    pub async fn from_run_cmd(run_cmd: &RunCmd) -> DispatcherResult<Self> {
        let database_args: DatabaseArgs = run_cmd.mongodb_args.clone().into();
        let notification_args: NotificationArgs = run_cmd.sns_args.clone().into();

        let database = MongoDbClient::new(&database_args).await?;
        let audit = MongoAuditClient::new(database.database());

        let aws_config = aws_config::defaults(BehaviorVersion::latest()).load().await;
        let notifier = SNS::new(&aws_config, &notification_args);

        Ok(Self {
            server_params: run_cmd.server_args.clone().into(),
            sweeper_params: run_cmd.sweeper_args.clone().into(),
            ladder: run_cmd.escalation_args.clone().into(),
            database: Box::new(database),
            notifier: Box::new(notifier),
            audit: Box::new(audit),
        })
    }

    pub fn database(&self) -> &dyn DatabaseClient {
        self.database.as_ref()
    }

    pub fn notifier(&self) -> &dyn NotificationClient {
        self.notifier.as_ref()
    }

    pub fn audit(&self) -> &dyn AuditClient {
        self.audit.as_ref()
    }

    pub fn ladder(&self) -> &EscalationLadder {
        &self.ladder
    }

    pub fn server_params(&self) -> &ServerParams {
        &self.server_params
    }

    pub fn sweeper_params(&self) -> &SweeperParams {
        &self.sweeper_params
    }
}

/// Convenience alias used across handlers and workers.
pub type SharedConfig = Arc<Config>;
