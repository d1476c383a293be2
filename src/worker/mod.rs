pub mod service;
pub mod sweeper;

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::core::config::SharedConfig;
use crate::error::DispatcherResult;
use crate::worker::sweeper::EscalationSweeper;

/// Handle for the background sweep loop.
pub struct SweeperController {
    shutdown_token: CancellationToken,
    task_handle: JoinHandle<()>,
}

impl SweeperController {
    /// Signals the loop to stop and waits for the in-flight tick to finish.
    pub async fn shutdown(self) -> Result<(), tokio::task::JoinError> {
        info!("Initiating sweeper graceful shutdown");
        self.shutdown_token.cancel();
        self.task_handle.await
    }
}

/// Spawns the escalation sweep loop on the configured interval.
///
/// Expiry is purely declarative (`expires_at` on the offer), so there is
/// no replay or catch-up logic here: after a crash or a missed tick, the
/// next tick naturally finds everything that is overdue. A tick that fails
/// only affects itself.
pub async fn initialize_worker(
    config: SharedConfig,
    shutdown_token: CancellationToken,
) -> DispatcherResult<SweeperController> {
    let interval_secs = config.sweeper_params().interval_secs;
    info!(interval_secs, "Initializing escalation sweeper");

    let token = shutdown_token.child_token();
    let loop_token = token.clone();

    let task_handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = loop_token.cancelled() => {
                    info!("Sweeper loop stopped");
                    break;
                }
                _ = ticker.tick() => {
                    EscalationSweeper::process_expired_offers(&config).await;
                }
            }
        }
    });

    Ok(SweeperController { shutdown_token: token, task_handle })
}
