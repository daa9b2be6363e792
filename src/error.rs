//! Content errors

use thiserror::Error;

/// Result type alias for content operations
pub type Result<T> = std::result::Result<T, ContentError>;

/// Errors raised while reading content from the external API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    /// Transport error or unparsable payload from the content service
    #[error("could not load content: {0}")]
    FetchFailure(String),

    /// The request was valid but no document matched
    #[error("no '{doc_type}' document with uid '{uid}'")]
    NotFound { doc_type: String, uid: String },

    /// A document lacks a field the presentation layer needs
    #[error("document '{uid}' is missing field '{field}'")]
    MalformedContent { uid: String, field: &'static str },
}

impl ContentError {
    /// Build a fetch failure for a payload that is missing a required field
    pub fn malformed_payload(field: &str) -> Self {
        ContentError::FetchFailure(format!("malformed payload: missing '{}'", field))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound { .. })
    }

    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, ContentError::FetchFailure(_))
    }
}

impl From<reqwest::Error> for ContentError {
    fn from(err: reqwest::Error) -> Self {
        ContentError::FetchFailure(err.to_string())
    }
}

impl From<serde_json::Error> for ContentError {
    fn from(err: serde_json::Error) -> Self {
        ContentError::FetchFailure(format!("invalid JSON payload: {}", err))
    }
}
