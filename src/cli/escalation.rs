use clap::Args;

/// Parameters used to config the escalation ladder.
#[derive(Debug, Clone, Args)]
#[group()]
pub struct EscalationCliArgs {
    /// Response window per attempt, in seconds.
    #[arg(env = "DISPATCHER_RESPONSE_WINDOW_SECS", long, default_value = "300")]
    pub response_window_secs: u64,

    /// Number of offer attempts before the ladder is exhausted and an
    /// administrator alert is raised.
    #[arg(env = "DISPATCHER_MAX_ATTEMPTS", long, default_value = "3")]
    pub max_attempts: u32,
}
