use clap::Args;

/// Parameters used to config AWS SNS.
#[derive(Debug, Clone, Args)]
#[group()]
pub struct AWSSNSCliArgs {
    /// The ARN / Name of the SNS topic worker offer notifications are
    /// published to.
    /// ARN: arn:aws:sns:region:accountID:name
    #[arg(env = "DISPATCHER_AWS_SNS_OFFER_TOPIC_IDENTIFIER", long, default_value = "offer-notifications")]
    pub offer_topic_identifier: String,

    /// The ARN / Name of the SNS topic administrator alerts are published
    /// to when the escalation ladder is exhausted.
    #[arg(env = "DISPATCHER_AWS_SNS_ADMIN_TOPIC_IDENTIFIER", long, default_value = "admin-alerts")]
    pub admin_topic_identifier: String,
}
