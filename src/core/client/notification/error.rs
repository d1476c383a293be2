use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("Topic not found: {0}")]
    TopicNotFound(String),

    #[error("Failed to list topics: {0}")]
    ListTopicsError(String),

    #[error("Failed to serialize notification payload: {0}")]
    PayloadError(#[from] serde_json::Error),

    #[error("Failed to send notification: {0}")]
    SendFailure(String),
}
