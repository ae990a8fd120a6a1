//! User-facing error helpers.
//!
//! Every failure is caught at the dispatcher boundary and shown to the user as a
//! single line of text. These helpers decide what that line says and how the
//! provider's own error message is pulled out of an HTTP error body.

use super::types::PromptError;
use serde_json::Value;

/// Shown when no credential was supplied.
pub const MISSING_CREDENTIAL_MESSAGE: &str = "Please set your API Key in Settings.";
/// Shown when the concept field is empty.
pub const MISSING_CONCEPT_MESSAGE: &str = "Please enter an input concept.";
/// Shown for failures whose details are not meaningful to an end user.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to generate prompt. Please try again.";

impl PromptError {
    /// Render this error as the single message string the UI displays.
    ///
    /// Provider messages pass through verbatim; transport and decoding
    /// failures collapse into a generic retry hint.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput(msg) => msg.clone(),
            Self::ProviderError { message, .. } => message.clone(),
            Self::NoAvailableKeys(_) => {
                "All shared API keys are currently unavailable. Please try again later.".to_string()
            }
            Self::UnknownModel(_)
            | Self::ParseError(_)
            | Self::NetworkError(_)
            | Self::ConfigurationError(_) => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Pull the provider's error message out of an HTTP error body.
///
/// Recognized shapes, in order:
/// - `{"error": {"message": "..."}}` (OpenAI, Anthropic, Gemini)
/// - `{"error": "..."}`
/// - `{"message": "..."}`
///
/// Returns `None` when the body is not JSON or carries none of these fields.
pub fn extract_error_message(body_text: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body_text).ok()?;
    let error = json.get("error");

    if let Some(msg) = error
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
    {
        return Some(msg.to_string());
    }
    if let Some(msg) = error.and_then(Value::as_str) {
        return Some(msg.to_string());
    }
    json.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Build a `ProviderError` for a non-success response.
///
/// The message comes from the body when present, else from the status reason
/// phrase (e.g. "Too Many Requests").
pub fn classify_http_error(status: u16, body_text: &str) -> PromptError {
    let message = extract_error_message(body_text).unwrap_or_else(|| {
        reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown error")
            .to_string()
    });

    match serde_json::from_str::<Value>(body_text) {
        Ok(details) => PromptError::provider_with_details(status, message, details),
        Err(_) => PromptError::provider(status, message),
    }
}
