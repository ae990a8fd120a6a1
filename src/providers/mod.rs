//! Provider adapters
//!
//! One adapter per selectable model. The adapter kind is a tagged variant per
//! provider family; each family module owns its endpoint route, auth headers,
//! request JSON shape, and response extraction. `ProviderAdapter` is the single
//! interface the dispatcher calls.

pub mod aggregator;
pub mod anthropic;
pub mod gemini;
pub mod openai;

pub use aggregator::AggregatorAdapter;
pub use anthropic::AnthropicAdapter;
pub use gemini::GeminiAdapter;
pub use openai::OpenAiAdapter;

use crate::error::PromptError;
use crate::execution::http::HttpHeaderBuilder;
use crate::types::{GenerationOptions, ModelInfo};
use reqwest::header::HeaderMap;

/// Where a family expects the credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialPlacement {
    /// `Authorization: Bearer <key>`
    Bearer,
    /// Provider-specific header, e.g. `x-api-key`
    Header(&'static str),
    /// URL query parameter, e.g. `?key=`
    QueryParam(&'static str),
    /// Field in the JSON body, e.g. `apiKey`
    BodyField(&'static str),
}

/// Company that issues the credential for a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vendor {
    Google,
    OpenAi,
    Anthropic,
    OpenRouter,
}

impl Vendor {
    /// Name shown next to the key field.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Google => "Google AI Studio",
            Self::OpenAi => "OpenAI",
            Self::Anthropic => "Anthropic",
            Self::OpenRouter => "OpenRouter",
        }
    }

    /// Page where a user creates a key for this vendor.
    pub fn key_console_url(&self) -> &'static str {
        match self {
            Self::Google => "https://aistudio.google.com/app/apikey",
            Self::OpenAi => "https://platform.openai.com/api-keys",
            Self::Anthropic => "https://console.anthropic.com/settings/keys",
            Self::OpenRouter => "https://openrouter.ai/keys",
        }
    }
}

/// Provider family with its family-specific data.
#[derive(Debug, Clone, PartialEq)]
pub enum AdapterKind {
    Gemini(GeminiAdapter),
    OpenAi(OpenAiAdapter),
    Anthropic(AnthropicAdapter),
    Aggregator(AggregatorAdapter),
}

/// A fully built outbound request, credential applied.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub url: String,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

/// Registry entry: how to call one selectable model and read its answer.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderAdapter {
    display_name: String,
    icon: String,
    kind: AdapterKind,
}

impl ProviderAdapter {
    pub fn new(display_name: impl Into<String>, icon: impl Into<String>, kind: AdapterKind) -> Self {
        Self {
            display_name: display_name.into(),
            icon: icon.into(),
            kind,
        }
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn kind(&self) -> &AdapterKind {
        &self.kind
    }

    /// Short family id for logs ("gemini", "openai", ...).
    pub fn family_id(&self) -> &'static str {
        match &self.kind {
            AdapterKind::Gemini(_) => "gemini",
            AdapterKind::OpenAi(a) => a.family_id(),
            AdapterKind::Anthropic(_) => "anthropic",
            AdapterKind::Aggregator(_) => "aggregator",
        }
    }

    pub fn vendor(&self) -> Vendor {
        match &self.kind {
            AdapterKind::Gemini(_) => Vendor::Google,
            AdapterKind::OpenAi(a) => a.vendor(),
            AdapterKind::Anthropic(_) => Vendor::Anthropic,
            AdapterKind::Aggregator(a) => a.upstream(),
        }
    }

    pub fn model_info(&self) -> ModelInfo {
        ModelInfo {
            name: self.display_name.clone(),
            icon: self.icon.clone(),
        }
    }

    pub fn credential_placement(&self) -> CredentialPlacement {
        match &self.kind {
            AdapterKind::Gemini(_) => gemini::CREDENTIAL_PLACEMENT,
            AdapterKind::OpenAi(_) => openai::CREDENTIAL_PLACEMENT,
            AdapterKind::Anthropic(_) => anthropic::CREDENTIAL_PLACEMENT,
            AdapterKind::Aggregator(_) => aggregator::CREDENTIAL_PLACEMENT,
        }
    }

    /// Endpoint URL without any credential attached.
    pub fn endpoint(&self) -> String {
        match &self.kind {
            AdapterKind::Gemini(a) => a.endpoint(),
            AdapterKind::OpenAi(a) => a.endpoint(),
            AdapterKind::Anthropic(a) => a.endpoint(),
            AdapterKind::Aggregator(a) => a.endpoint(),
        }
    }

    /// JSON content type, family headers, and header-placed credentials.
    pub fn build_headers(&self, credential: &str) -> Result<HeaderMap, PromptError> {
        let mut builder = HttpHeaderBuilder::new().with_json_content_type();
        builder = match self.credential_placement() {
            CredentialPlacement::Bearer => builder.with_bearer_auth(credential)?,
            CredentialPlacement::Header(name) => builder.with_custom_auth(name, credential)?,
            CredentialPlacement::QueryParam(_) | CredentialPlacement::BodyField(_) => builder,
        };
        builder = match &self.kind {
            AdapterKind::OpenAi(a) => a.extra_headers(builder)?,
            AdapterKind::Anthropic(a) => a.extra_headers(builder)?,
            AdapterKind::Gemini(_) | AdapterKind::Aggregator(_) => builder,
        };
        Ok(builder.build())
    }

    /// Provider-native request body, credential not included.
    pub fn build_request(&self, concept: &str, options: &GenerationOptions) -> serde_json::Value {
        match &self.kind {
            AdapterKind::Gemini(a) => a.build_request(concept, options),
            AdapterKind::OpenAi(a) => a.build_request(concept, options),
            AdapterKind::Anthropic(a) => a.build_request(concept, options),
            AdapterKind::Aggregator(a) => a.build_request(&self.display_name, concept, options),
        }
    }

    /// Extract the generated text from a success body.
    pub fn parse_response(&self, body: &serde_json::Value) -> Result<String, PromptError> {
        match &self.kind {
            AdapterKind::Gemini(_) => gemini::parse_response(body),
            AdapterKind::OpenAi(_) => openai::parse_response(body),
            AdapterKind::Anthropic(_) => anthropic::parse_response(body),
            AdapterKind::Aggregator(_) => aggregator::parse_response(body),
        }
    }

    /// Build the complete outbound request with the credential placed where
    /// the family expects it.
    pub fn prepare(
        &self,
        concept: &str,
        options: &GenerationOptions,
        credential: &str,
    ) -> Result<PreparedRequest, PromptError> {
        let mut url = self.endpoint();
        let headers = self.build_headers(credential)?;
        let mut body = self.build_request(concept, options);

        match self.credential_placement() {
            CredentialPlacement::QueryParam(name) => {
                url = append_query_param(&url, name, credential);
            }
            CredentialPlacement::BodyField(name) => {
                if let Some(obj) = body.as_object_mut() {
                    obj.insert(
                        name.to_string(),
                        serde_json::Value::String(credential.to_string()),
                    );
                }
            }
            CredentialPlacement::Bearer | CredentialPlacement::Header(_) => {}
        }

        Ok(PreparedRequest { url, headers, body })
    }
}

/// Join a base URL and a path with exactly one slash between them.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn append_query_param(url: &str, name: &str, value: &str) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}{name}={}", urlencoding::encode(value))
}

/// Mask a credential for logs: keeps a short prefix and suffix.
pub fn mask_credential(credential: &str) -> String {
    let chars: Vec<char> = credential.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}…{tail}")
}
