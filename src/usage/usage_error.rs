use thiserror::Error;

#[derive(Debug, Error)]
pub enum UsageError {
    #[error("usage log I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("usage event serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Bad event or filter from the caller.
    #[error("{0}")]
    Invalid(String),
}
