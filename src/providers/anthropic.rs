//! Anthropic Messages API

use super::{CredentialPlacement, join_url};
use crate::error::PromptError;
use crate::execution::http::HttpHeaderBuilder;
use crate::prompt::PromptTemplate;
use crate::types::GenerationOptions;
use serde_json::{Value, json};

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
pub const API_VERSION: &str = "2023-06-01";
pub const DEFAULT_MAX_TOKENS: u32 = 2048;

pub const CREDENTIAL_PLACEMENT: CredentialPlacement = CredentialPlacement::Header("x-api-key");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnthropicAdapter {
    pub model: String,
    pub base_url: String,
    pub max_tokens: u32,
}

impl AnthropicAdapter {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn endpoint(&self) -> String {
        join_url(&self.base_url, "messages")
    }

    pub(super) fn extra_headers(
        &self,
        builder: HttpHeaderBuilder,
    ) -> Result<HttpHeaderBuilder, PromptError> {
        builder.with_header("anthropic-version", API_VERSION)
    }

    pub fn build_request(&self, concept: &str, options: &GenerationOptions) -> Value {
        let template = PromptTemplate::build(concept, options);
        json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "system": template.system,
            "messages": [
                { "role": "user", "content": template.user }
            ]
        })
    }
}

/// Text blocks of `content[]`, concatenated.
pub fn parse_response(body: &Value) -> Result<String, PromptError> {
    let blocks = body
        .get("content")
        .and_then(Value::as_array)
        .ok_or_else(|| PromptError::ParseError("Anthropic response has no content".into()))?;

    let text: String = blocks
        .iter()
        .filter(|b| b.get("type").and_then(Value::as_str) == Some("text"))
        .filter_map(|b| b.get("text").and_then(Value::as_str))
        .collect();

    if text.is_empty() {
        return Err(PromptError::ParseError(
            "Anthropic response contains no text blocks".to_string(),
        ));
    }
    Ok(text)
}
