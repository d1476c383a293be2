use clap::{Parser, Subcommand};

pub mod database;
pub mod escalation;
pub mod notification;
pub mod server;
pub mod sweeper;

#[derive(Parser, Debug)]
#[command(
    name = "dispatcher",
    about = "Dispatcher - job-offer dispatch and escalation engine",
    long_about = "Dispatcher offers operational jobs to qualified workers, waits for a bounded \
    response window, and escalates unanswered offers through a widening-audience ladder until \
    a worker accepts or an administrator is alerted."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the dispatch service
    Run {
        #[command(flatten)]
        run_command: Box<RunCmd>,
    },
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct RunCmd {
    #[command(flatten)]
    pub mongodb_args: database::MongoDBCliArgs,

    #[command(flatten)]
    pub sns_args: notification::AWSSNSCliArgs,

    #[command(flatten)]
    pub server_args: server::ServerCliArgs,

    #[command(flatten)]
    pub sweeper_args: sweeper::SweeperCliArgs,

    #[command(flatten)]
    pub escalation_args: escalation::EscalationCliArgs,
}
