//! OpenAI Chat Completions and OpenAI-compatible vendors (OpenRouter)

use super::{CredentialPlacement, Vendor, join_url};
use crate::error::PromptError;
use crate::execution::http::HttpHeaderBuilder;
use crate::prompt::PromptTemplate;
use crate::types::GenerationOptions;
use serde_json::{Value, json};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

pub const CREDENTIAL_PLACEMENT: CredentialPlacement = CredentialPlacement::Bearer;

/// Application title reported to OpenRouter's dashboard.
const OPENROUTER_TITLE: &str = "Modi Prompt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiAdapter {
    pub model: String,
    pub base_url: String,
    pub vendor: Vendor,
}

impl OpenAiAdapter {
    pub fn openai(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            base_url: OPENAI_BASE_URL.to_string(),
            vendor: Vendor::OpenAi,
        }
    }

    pub fn openrouter(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            base_url: OPENROUTER_BASE_URL.to_string(),
            vendor: Vendor::OpenRouter,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn vendor(&self) -> Vendor {
        self.vendor
    }

    pub fn family_id(&self) -> &'static str {
        match self.vendor {
            Vendor::OpenRouter => "openrouter",
            _ => "openai",
        }
    }

    pub fn endpoint(&self) -> String {
        join_url(&self.base_url, "chat/completions")
    }

    pub(super) fn extra_headers(
        &self,
        builder: HttpHeaderBuilder,
    ) -> Result<HttpHeaderBuilder, PromptError> {
        match self.vendor {
            Vendor::OpenRouter => builder.with_header("X-Title", OPENROUTER_TITLE),
            _ => Ok(builder),
        }
    }

    pub fn build_request(&self, concept: &str, options: &GenerationOptions) -> Value {
        let template = PromptTemplate::build(concept, options);
        let mut body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": template.system },
                { "role": "user", "content": template.user }
            ]
        });
        // JSON mode is not honored by every model OpenRouter routes to.
        if self.vendor == Vendor::OpenAi {
            body["response_format"] = json!({ "type": "json_object" });
        }
        body
    }
}

/// `choices[0].message.content`
pub fn parse_response(body: &Value) -> Result<String, PromptError> {
    body.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            PromptError::ParseError("Chat completion response has no message content".to_string())
        })
}
