use docintake_backend::BackendError;
use thiserror::Error;

/// Anything that makes a handler fall back to its 500 response.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The transport could not deliver the request body (e.g. too large).
    #[error("request body could not be read: {0}")]
    Body(String),

    /// The body was not valid JSON or did not match the request shape.
    #[error(transparent)]
    Parse(#[from] serde_json::Error),

    /// An external call failed.
    #[error(transparent)]
    Backend(#[from] BackendError),
}
