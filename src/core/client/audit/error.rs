use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Failed to append audit event: {0}")]
    AppendFailure(#[from] mongodb::error::Error),
}
