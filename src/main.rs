use std::sync::Arc;

use clap::Parser as _;
use dispatcher::cli::{Cli, Commands, RunCmd};
use dispatcher::core::config::Config;
use dispatcher::server::setup_server;
use dispatcher::utils::logging::init_logging;
use dispatcher::worker::initialize_worker;
use dispatcher::DispatcherResult;
use dotenvy::dotenv;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_logging();
    info!("Starting dispatcher");
    let cli = Cli::parse();

    match &cli.command {
        Commands::Run { run_command } => {
            if let Err(e) = run_dispatcher(run_command).await {
                error!(error = %e, error_chain = ?e, "Failed to run dispatcher service");
                std::process::exit(1);
            }
        }
    }
}

async fn run_dispatcher(run_cmd: &RunCmd) -> DispatcherResult<()> {
    let config = Arc::new(Config::from_run_cmd(run_cmd).await?);
    debug!("Configuration initialized");

    let shutdown_token = CancellationToken::new();

    let (_address, server_handle) = setup_server(config.clone()).await?;
    let sweeper_controller = initialize_worker(config, shutdown_token.clone()).await?;

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| dispatcher::DispatcherError::Other(e.into()))?;
    info!("Shutdown signal received");

    shutdown_token.cancel();
    sweeper_controller
        .shutdown()
        .await
        .map_err(|e| dispatcher::DispatcherError::WorkerError(e.to_string()))?;
    server_handle
        .shutdown()
        .await
        .map_err(|e| dispatcher::DispatcherError::ServerError(e.to_string()))?;

    info!("Dispatcher stopped");
    Ok(())
}
