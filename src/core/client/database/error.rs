use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Failed to connect to the database: {0}")]
    ConnectionError(String),

    #[error("MongoDB error: {0}")]
    MongoError(#[from] mongodb::error::Error),

    #[error("BSON serialization error: {0}")]
    BsonError(#[from] mongodb::bson::ser::Error),

    /// The job already carries an open offer; a concurrent writer won the
    /// race to create one.
    #[error("Job {job_id} already has an active offer {offer_id}")]
    ActiveOfferExists { job_id: String, offer_id: String },

    /// A version- or status-filtered update matched nothing: the document
    /// changed under us. The caller decides whether this is a retryable
    /// conflict or a benign already-resolved no-op.
    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    #[error("Document not found: {0}")]
    NotFound(String),
}
