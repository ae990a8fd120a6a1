//! Backend aggregator (`POST /generate-prompt`)
//!
//! The aggregator owns the instruction template and the provider fan-out. It
//! receives the display name, the raw concept, the option bag, and the user's
//! key in the JSON body.

use super::{CredentialPlacement, Vendor, join_url};
use crate::error::PromptError;
use crate::types::GenerationOptions;
use serde_json::{Value, json};

pub const DEFAULT_BASE_URL: &str = "https://mp-server.replit.app/api";

pub const CREDENTIAL_PLACEMENT: CredentialPlacement = CredentialPlacement::BodyField("apiKey");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatorAdapter {
    pub base_url: String,
    /// Vendor whose key the user supplies for this model.
    pub upstream: Vendor,
}

impl AggregatorAdapter {
    pub fn new(base_url: impl Into<String>, upstream: Vendor) -> Self {
        Self {
            base_url: base_url.into(),
            upstream,
        }
    }

    pub fn upstream(&self) -> Vendor {
        self.upstream
    }

    pub fn endpoint(&self) -> String {
        join_url(&self.base_url, "generate-prompt")
    }

    pub fn build_request(
        &self,
        display_name: &str,
        concept: &str,
        options: &GenerationOptions,
    ) -> Value {
        json!({
            "model": display_name,
            "prompt": concept,
            "options": options,
        })
    }
}

/// `{"prompt": "..."}`
pub fn parse_response(body: &Value) -> Result<String, PromptError> {
    body.get("prompt")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| PromptError::ParseError("Aggregator response has no prompt field".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_raw_concept_and_options() {
        let a = AggregatorAdapter::new(DEFAULT_BASE_URL, Vendor::Google);
        let body = a.build_request(
            "Gemini 2.5 Flash",
            "tidal pools",
            &GenerationOptions::new().with_pacing("Slow burn"),
        );
        assert_eq!(body["model"], "Gemini 2.5 Flash");
        assert_eq!(body["prompt"], "tidal pools");
        assert_eq!(body["options"]["pacing"], "Slow burn");
        assert_eq!(body["options"]["cameraStyle"], "Drone aerials");
        assert_eq!(a.endpoint(), "https://mp-server.replit.app/api/generate-prompt");
    }

    #[test]
    fn parses_prompt_field() {
        assert_eq!(
            parse_response(&json!({ "prompt": "{}" })).unwrap(),
            "{}"
        );
        assert!(parse_response(&json!({ "result": "x" })).is_err());
    }
}
