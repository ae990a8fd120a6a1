//! Type Conversions for PromptError
//!
//! From implementations for common error types.

use super::types::PromptError;

/// The URL is dropped: query-placed credentials would otherwise end up in
/// messages and logs.
impl From<reqwest::Error> for PromptError {
    fn from(err: reqwest::Error) -> Self {
        Self::NetworkError(err.without_url().to_string())
    }
}

impl From<serde_json::Error> for PromptError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}
