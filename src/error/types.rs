//! Core error types.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, PromptError>;

/// Errors produced while resolving, calling, or decoding a generation backend.
#[derive(Debug, Clone, Error)]
pub enum PromptError {
    /// Missing concept or credential. Raised before any network call.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The selected display name is not in the registry.
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    /// The backend answered with a non-success HTTP status.
    #[error("Provider error ({status}): {message}")]
    ProviderError {
        status: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// The response body did not carry the expected text field.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Transport-level failure (DNS, TLS, connection reset, ...).
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Invalid local configuration (header values, proxy URL, config documents).
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Shared-credential mode with no usable key left.
    #[error("No available credentials: {0}")]
    NoAvailableKeys(String),
}

/// Coarse error classification for presentation and routing decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Routing,
    Authentication,
    RateLimit,
    Client,
    Server,
    Parsing,
    Network,
    Configuration,
    Exhausted,
}

impl PromptError {
    /// Create a provider error without a raw body.
    pub fn provider(status: u16, message: impl Into<String>) -> Self {
        Self::ProviderError {
            status,
            message: message.into(),
            details: None,
        }
    }

    /// Create a provider error that keeps the raw JSON body for verbose display.
    pub fn provider_with_details(
        status: u16,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self::ProviderError {
            status,
            message: message.into(),
            details: Some(details),
        }
    }

    /// HTTP status code, when the error came from a backend response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ProviderError { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput(_) => ErrorCategory::Validation,
            Self::UnknownModel(_) => ErrorCategory::Routing,
            Self::ProviderError { status, .. } => match *status {
                401 | 403 => ErrorCategory::Authentication,
                429 => ErrorCategory::RateLimit,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Client,
            },
            Self::ParseError(_) => ErrorCategory::Parsing,
            Self::NetworkError(_) => ErrorCategory::Network,
            Self::ConfigurationError(_) => ErrorCategory::Configuration,
            Self::NoAvailableKeys(_) => ErrorCategory::Exhausted,
        }
    }

    /// Whether the backend refused the credential itself (bad key, revoked key,
    /// exhausted free-tier quota). Such keys are excluded from a shared pool.
    pub fn is_credential_rejection(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Authentication | ErrorCategory::RateLimit
        )
    }
}
