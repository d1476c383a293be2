pub mod escalation;

use crate::cli::database::MongoDBCliArgs;
use crate::cli::notification::AWSSNSCliArgs;
use crate::cli::server::ServerCliArgs;
use crate::cli::sweeper::SweeperCliArgs;

/// Validated MongoDB parameters.
#[derive(Debug, Clone)]
pub struct DatabaseArgs {
    pub connection_uri: String,
    pub database_name: String,
}

impl From<MongoDBCliArgs> for DatabaseArgs {
    fn from(args: MongoDBCliArgs) -> Self {
        Self { connection_uri: args.mongodb_connection_url, database_name: args.mongodb_database_name }
    }
}

/// Validated SNS parameters. Worker offers and administrator alerts fan
/// out through separate topics so downstream delivery (push/SMS/email) can
/// route them differently.
#[derive(Debug, Clone)]
pub struct NotificationArgs {
    pub offer_topic: String,
    pub admin_topic: String,
}

impl From<AWSSNSCliArgs> for NotificationArgs {
    fn from(args: AWSSNSCliArgs) -> Self {
        Self { offer_topic: args.offer_topic_identifier, admin_topic: args.admin_topic_identifier }
    }
}

/// Parameters for the HTTP surface.
#[derive(Debug, Clone)]
pub struct ServerParams {
    pub host: String,
    pub port: u16,
}

impl From<ServerCliArgs> for ServerParams {
    fn from(args: ServerCliArgs) -> Self {
        Self { host: args.host, port: args.port }
    }
}

/// Parameters for the escalation sweep loop.
#[derive(Debug, Clone, Copy)]
pub struct SweeperParams {
    /// Seconds between ticks of the internal scheduler.
    pub interval_secs: u64,
    /// Upper bound on expired offers handled per tick; leftovers are
    /// picked up by the next tick.
    pub batch_size: i64,
}

impl From<SweeperCliArgs> for SweeperParams {
    fn from(args: SweeperCliArgs) -> Self {
        // tokio::time::interval panics on a zero period.
        Self { interval_secs: args.sweep_interval_secs.max(1), batch_size: args.sweep_batch_size }
    }
}
