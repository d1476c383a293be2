use clap::Args;

/// Parameters used to config the escalation sweeper.
#[derive(Debug, Clone, Args)]
#[group()]
pub struct SweeperCliArgs {
    /// Seconds between sweep ticks.
    #[arg(env = "DISPATCHER_SWEEP_INTERVAL_SECS", long, default_value = "60")]
    pub sweep_interval_secs: u64,

    /// Maximum expired offers processed per tick.
    #[arg(env = "DISPATCHER_SWEEP_BATCH_SIZE", long, default_value = "100")]
    pub sweep_batch_size: i64,
}
