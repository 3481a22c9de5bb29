use thiserror::Error;

/// Errors from the external collaborators (object storage, document store, queue).
#[derive(Debug, Error)]
pub enum BackendError {
    /// Missing or invalid configuration, e.g. no bucket or queue URL.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request or a stored item could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The service rejected the request.
    #[error("service error: {0}")]
    Service(String),

    /// The service throttled the request; carries the service's message.
    #[error("request throttled: {0}")]
    Throttled(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("request timed out: {0}")]
    Timeout(String),
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
