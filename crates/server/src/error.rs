use thiserror::Error;

/// Errors that can occur when starting or running the docintake server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// A backend could not be set up (e.g. table creation failed).
    #[error("backend error: {0}")]
    Backend(String),

    /// An I/O error (e.g. binding the listener).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
