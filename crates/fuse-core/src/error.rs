//! Errors raised by the search capability.

use thiserror::Error;

/// Error type for search operations.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The configuration object has a field of the wrong shape
    #[error("invalid search options: {0}")]
    Options(#[from] serde_json::Error),

    /// The configuration is well-formed but semantically invalid
    #[error("invalid search configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias using SearchError.
pub type Result<T> = std::result::Result<T, SearchError>;
