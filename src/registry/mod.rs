//! Provider Registry
//!
//! Static lookup from model display name to its adapter. Built once through
//! `ProviderRegistryBuilder` and read-only afterwards; adding a provider means
//! adding one entry to the builder, nothing else changes.

use std::collections::HashMap;

use crate::config::ProviderEndpoints;
use crate::error::PromptError;
use crate::providers::{
    AdapterKind, AggregatorAdapter, AnthropicAdapter, GeminiAdapter, OpenAiAdapter,
    ProviderAdapter, Vendor,
};
use crate::types::ModelInfo;

/// Built-in model table: (display name, icon ref, vendor, provider model id).
const BUILTIN_MODELS: &[(&str, &str, Vendor, &str)] = &[
    ("Gemini 2.5 Flash", "gemini", Vendor::Google, "gemini-2.5-flash"),
    ("Gemini 2.5 Pro", "gemini", Vendor::Google, "gemini-2.5-pro"),
    ("GPT-4o", "openai", Vendor::OpenAi, "gpt-4o"),
    ("GPT-4.1", "openai", Vendor::OpenAi, "gpt-4.1"),
    ("o4-mini", "openai", Vendor::OpenAi, "o4-mini"),
    ("Claude Sonnet 4", "anthropic", Vendor::Anthropic, "claude-sonnet-4-20250514"),
    ("Claude Opus 4", "anthropic", Vendor::Anthropic, "claude-opus-4-20250514"),
    ("OpenRouter Auto", "openrouter", Vendor::OpenRouter, "openrouter/auto"),
];

/// Display name selected when the UI has no prior choice.
pub const DEFAULT_MODEL: &str = "Gemini 2.5 Flash";

/// Read-only registry keyed by display name.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    by_name: HashMap<String, ProviderAdapter>,
    /// Display names in registration order, for stable listings
    order: Vec<String>,
}

impl ProviderRegistry {
    pub fn builder() -> ProviderRegistryBuilder {
        ProviderRegistryBuilder::default()
    }

    /// Built-in models calling each provider directly at its public endpoint.
    pub fn builtin() -> Self {
        Self::direct(&ProviderEndpoints::default())
    }

    /// Built-in models calling each provider directly at the given endpoints.
    pub fn direct(endpoints: &ProviderEndpoints) -> Self {
        let mut builder = Self::builder();
        for &(name, icon, vendor, model) in BUILTIN_MODELS {
            let kind = match vendor {
                Vendor::Google => AdapterKind::Gemini(
                    GeminiAdapter::new(model).with_base_url(endpoints.gemini.clone()),
                ),
                Vendor::OpenAi => AdapterKind::OpenAi(
                    OpenAiAdapter::openai(model).with_base_url(endpoints.openai.clone()),
                ),
                Vendor::OpenRouter => AdapterKind::OpenAi(
                    OpenAiAdapter::openrouter(model).with_base_url(endpoints.openrouter.clone()),
                ),
                Vendor::Anthropic => AdapterKind::Anthropic(
                    AnthropicAdapter::new(model).with_base_url(endpoints.anthropic.clone()),
                ),
            };
            builder = builder.register(ProviderAdapter::new(name, icon, kind));
        }
        builder.build()
    }

    /// Built-in models routed through the backend aggregator.
    pub fn aggregated(aggregator_base_url: &str) -> Self {
        let mut builder = Self::builder();
        for &(name, icon, vendor, _) in BUILTIN_MODELS {
            let kind = AdapterKind::Aggregator(AggregatorAdapter::new(aggregator_base_url, vendor));
            builder = builder.register(ProviderAdapter::new(name, icon, kind));
        }
        builder.build()
    }

    /// Resolve an adapter by display name.
    pub fn resolve(&self, name: &str) -> Result<&ProviderAdapter, PromptError> {
        self.by_name
            .get(name)
            .ok_or_else(|| PromptError::UnknownModel(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Display names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// `[{name, icon}]` in registration order, as served by `GET /models`.
    pub fn models(&self) -> Vec<ModelInfo> {
        self.order
            .iter()
            .filter_map(|n| self.by_name.get(n))
            .map(ProviderAdapter::model_info)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Collects adapters before the registry is frozen.
#[derive(Debug, Default)]
pub struct ProviderRegistryBuilder {
    registry: ProviderRegistry,
}

impl ProviderRegistryBuilder {
    /// Register an adapter; a later entry with the same display name replaces
    /// the earlier one but keeps its listing position.
    pub fn register(mut self, adapter: ProviderAdapter) -> Self {
        let name = adapter.display_name().to_string();
        if !self.registry.by_name.contains_key(&name) {
            self.registry.order.push(name.clone());
        }
        self.registry.by_name.insert(name, adapter);
        self
    }

    pub fn build(self) -> ProviderRegistry {
        self.registry
    }
}
