//! Google Gemini (`generateContent`)

use super::{CredentialPlacement, join_url};
use crate::error::PromptError;
use crate::prompt::PromptTemplate;
use crate::types::GenerationOptions;
use serde_json::{Value, json};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini takes the key as a `key` query parameter.
pub const CREDENTIAL_PLACEMENT: CredentialPlacement = CredentialPlacement::QueryParam("key");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiAdapter {
    pub model: String,
    pub base_url: String,
}

impl GeminiAdapter {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn endpoint(&self) -> String {
        join_url(
            &self.base_url,
            &format!("models/{}:generateContent", self.model),
        )
    }

    pub fn build_request(&self, concept: &str, options: &GenerationOptions) -> Value {
        let template = PromptTemplate::build(concept, options);
        json!({
            "systemInstruction": {
                "parts": [{ "text": template.system }]
            },
            "contents": [{
                "role": "user",
                "parts": [{ "text": template.user }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json"
            }
        })
    }
}

/// `candidates[0].content.parts[*].text`, concatenated.
pub fn parse_response(body: &Value) -> Result<String, PromptError> {
    let candidate = body
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|c| c.first());

    let Some(candidate) = candidate else {
        if let Some(reason) = body
            .pointer("/promptFeedback/blockReason")
            .and_then(Value::as_str)
        {
            return Err(PromptError::ParseError(format!(
                "Gemini blocked the prompt: {reason}"
            )));
        }
        return Err(PromptError::ParseError(
            "Gemini response has no candidates".to_string(),
        ));
    };

    let parts = candidate
        .pointer("/content/parts")
        .and_then(Value::as_array)
        .ok_or_else(|| PromptError::ParseError("Gemini candidate has no content parts".into()))?;

    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(Value::as_str))
        .collect();

    if text.is_empty() {
        return Err(PromptError::ParseError(
            "Gemini candidate contains no text".to_string(),
        ));
    }
    Ok(text)
}
