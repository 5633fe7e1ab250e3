//! Session error types.

use std::path::PathBuf;

use crate::ServiceError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExchangeError {
    /// The completion service failed or timed out. The message is the
    /// service's own description.
    #[error("{0}")]
    Upstream(String),
    /// Another exchange is already in flight on this session.
    #[error("session is busy with another request")]
    Busy,
}

impl From<ServiceError> for ExchangeError {
    fn from(err: ServiceError) -> Self {
        ExchangeError::Upstream(err.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("transcript file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("malformed transcript: {0}")]
    Malformed(String),

    #[error("failed to encode transcript: {0}")]
    Encode(String),

    #[error("transcript I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
