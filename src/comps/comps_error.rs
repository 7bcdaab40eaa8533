use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompsError {
    /// The listings API credential is missing.
    #[error("configuration error: {0}")]
    Config(String),

    /// The caller sent something we can't turn into query criteria.
    #[error("invalid request: {0}")]
    Input(String),

    /// The listings API answered with a non-success status.
    #[error("listings API returned HTTP {status}")]
    Upstream { status: u16, body: String },

    #[error("unexpected error: {0}")]
    Unexpected(String),
}
