//! Shared error types for the services crate.

use thiserror::Error;

/// Errors emitted by `MoviesLoader`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MoviesLoaderError {
    #[error("movie list request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("malformed movie list: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors reported by a question source.
///
/// `Load` means the question data could not be fetched at all; `Data` carries
/// a human-readable message about a problem with the fetched data.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionSourceError {
    #[error("Failed to load quiz data")]
    Load(#[source] MoviesLoaderError),
    #[error("{0}")]
    Data(String),
}

impl QuestionSourceError {
    #[must_use]
    pub fn data(message: impl Into<String>) -> Self {
        Self::Data(message.into())
    }
}
