//! Error types for bsab-api

use thiserror::Error;

/// Result type alias using bsab-api Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when calling the backend.
///
/// Each variant corresponds to one gateway operation. Transport-level
/// failures (unreachable host, connection reset) are folded into the
/// operation's own variant with a generic message, so callers see a
/// single failure kind per operation regardless of where it broke.
#[derive(Error, Debug)]
pub enum Error {
    /// The text query endpoint returned non-2xx or was unreachable
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// The file/image query endpoint returned non-2xx, reported an
    /// error field, or omitted the answer
    #[error("image query failed: {0}")]
    ImageQueryFailed(String),

    /// The reference embedding endpoint returned non-2xx or reported
    /// a failure message
    #[error("embed failed: {0}")]
    EmbedFailed(String),
}

impl Error {
    /// The backend-supplied (or generic) message inside this error
    pub fn message(&self) -> &str {
        match self {
            Error::QueryFailed(m) | Error::ImageQueryFailed(m) | Error::EmbedFailed(m) => m,
        }
    }
}
