// errors.rs
use crate::comps::CompsError;
use crate::usage::UsageError;
use astra::Response;
use thiserror::Error;

/// Errors originating from either the server logic
/// (routing, bad input, etc.) or downstream layers (listings API, usage log).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    /// A required setting is missing. Detail is logged, not returned.
    #[error("Misconfigured: {0}")]
    Misconfigured(String),

    #[error("Upstream HTTP {status}")]
    Upstream { status: u16, details: String },

    /// Detail is logged, not returned.
    #[error("Internal Server Error: {0}")]
    Internal(String),
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

impl From<CompsError> for ServerError {
    fn from(err: CompsError) -> Self {
        match err {
            CompsError::Config(msg) => ServerError::Misconfigured(msg),
            CompsError::Input(msg) => ServerError::BadRequest(msg),
            CompsError::Upstream { status, body } => ServerError::Upstream {
                status,
                details: body,
            },
            CompsError::Unexpected(msg) => ServerError::Internal(msg),
        }
    }
}

impl From<UsageError> for ServerError {
    fn from(err: UsageError) -> Self {
        match err {
            UsageError::Invalid(msg) => ServerError::BadRequest(msg),
            other => ServerError::Internal(other.to_string()),
        }
    }
}
