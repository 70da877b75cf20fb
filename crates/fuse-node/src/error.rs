//! Common error types for node plugins.

use thiserror::Error;

/// Common error type for node operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A parameter holds text that is not valid JSON
    #[error("could not parse parameter '{parameter}': {source}")]
    Parse {
        parameter: String,
        #[source]
        source: serde_json::Error,
    },

    /// A parameter is missing, unknown, or of the wrong shape
    #[error("invalid parameter '{parameter}': {message}")]
    InvalidParameter { parameter: String, message: String },

    /// Failure raised by the search capability
    #[error("search error: {0}")]
    Search(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Processing of one batch item failed
    #[error("item {index}: {source}")]
    Item {
        index: usize,
        #[source]
        source: Box<Error>,
    },

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("{0}")]
    Internal(String),
}

impl Error {
    pub fn parse(parameter: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Parse {
            parameter: parameter.into(),
            source,
        }
    }

    pub fn invalid_parameter(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    pub fn search(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Search(Box::new(err))
    }

    /// Attach the batch position of the item that failed.
    pub fn at_item(self, index: usize) -> Self {
        Self::Item {
            index,
            source: Box::new(self),
        }
    }

    /// True for malformed JSON in a parameter, however deeply wrapped.
    pub fn is_parse(&self) -> bool {
        match self {
            Self::Parse { .. } => true,
            Self::Item { source, .. } => source.is_parse(),
            _ => false,
        }
    }
}

/// Result type alias using the node Error.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message() {
        let source = serde_json::from_str::<serde_json::Value>("{not valid").unwrap_err();
        let err = Error::parse("items", source);
        assert!(err.to_string().starts_with("could not parse parameter 'items'"));
        assert!(err.is_parse());
    }

    #[test]
    fn test_item_wrapping() {
        let source = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        let err = Error::parse("options", source).at_item(2);
        assert!(err.to_string().starts_with("item 2: could not parse parameter 'options'"));
        assert!(err.is_parse());

        let err = Error::invalid_parameter("keys", "expected a string").at_item(0);
        assert!(!err.is_parse());
    }
}
