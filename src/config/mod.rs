//! Application configuration
//!
//! `AppConfig` can be loaded from a JSON document or from `MODI_PROMPT_*`
//! environment variables, and wires the dispatcher for either dispatch mode.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize};

use crate::aggregator::AggregatorClient;
use crate::dispatcher::Dispatcher;
use crate::error::PromptError;
use crate::execution::http::{ReqwestTransport, build_http_client_from_config};
use crate::key_pool::KeyPool;
use crate::providers::{aggregator, anthropic, gemini, openai};
use crate::registry::{DEFAULT_MODEL, ProviderRegistry};
use crate::types::HttpConfig;

pub const ENV_MODE: &str = "MODI_PROMPT_MODE";
pub const ENV_AGGREGATOR_URL: &str = "MODI_PROMPT_AGGREGATOR_URL";
pub const ENV_POOL_KEYS: &str = "MODI_PROMPT_POOL_KEYS";
pub const ENV_DEFAULT_MODEL: &str = "MODI_PROMPT_DEFAULT_MODEL";
pub const ENV_TIMEOUT_SECS: &str = "MODI_PROMPT_TIMEOUT_SECS";

/// Base URLs per provider family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderEndpoints {
    pub gemini: String,
    pub openai: String,
    pub anthropic: String,
    pub openrouter: String,
    pub aggregator: String,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            gemini: gemini::DEFAULT_BASE_URL.to_string(),
            openai: openai::OPENAI_BASE_URL.to_string(),
            anthropic: anthropic::DEFAULT_BASE_URL.to_string(),
            openrouter: openai::OPENROUTER_BASE_URL.to_string(),
            aggregator: aggregator::DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Where generation requests go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// Call each provider with the user's key
    #[default]
    Direct,
    /// Forward everything to the backend aggregator
    Aggregator,
}

impl std::str::FromStr for DispatchMode {
    type Err = PromptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(Self::Direct),
            "aggregator" => Ok(Self::Aggregator),
            other => Err(PromptError::ConfigurationError(format!(
                "Unknown dispatch mode '{other}', expected 'direct' or 'aggregator'"
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub mode: DispatchMode,
    pub endpoints: ProviderEndpoints,
    pub http: HttpConfig,
    /// Shared free-tier keys, in priority order
    #[serde(deserialize_with = "deserialize_secrets")]
    pub pool_keys: Vec<SecretString>,
    pub default_model: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mode: DispatchMode::default(),
            endpoints: ProviderEndpoints::default(),
            http: HttpConfig::default(),
            pool_keys: Vec::new(),
            default_model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_json_str(json: &str) -> Result<Self, PromptError> {
        serde_json::from_str(json)
            .map_err(|e| PromptError::ConfigurationError(format!("Invalid config document: {e}")))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PromptError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            PromptError::ConfigurationError(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json_str(&contents)
    }

    /// Defaults overridden by `MODI_PROMPT_*` environment variables.
    pub fn from_env() -> Result<Self, PromptError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Like `from_env`, reading variables through `lookup`.
    pub fn from_vars<F>(lookup: F) -> Result<Self, PromptError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(mode) = var(ENV_MODE) {
            config.mode = mode.parse()?;
        }
        if let Some(url) = var(ENV_AGGREGATOR_URL) {
            config.endpoints.aggregator = url.trim().to_string();
        }
        if let Some(keys) = var(ENV_POOL_KEYS) {
            config.pool_keys = keys
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(|k| SecretString::from(k.to_string()))
                .collect();
        }
        if let Some(model) = var(ENV_DEFAULT_MODEL) {
            config.default_model = model.trim().to_string();
        }
        if let Some(secs) = var(ENV_TIMEOUT_SECS) {
            let secs: f64 = secs.trim().parse().map_err(|_| {
                PromptError::ConfigurationError(format!(
                    "{ENV_TIMEOUT_SECS} must be a number of seconds, got '{secs}'"
                ))
            })?;
            let timeout = Duration::try_from_secs_f64(secs)
                .ok()
                .filter(|d| !d.is_zero())
                .ok_or_else(|| {
                    PromptError::ConfigurationError(format!(
                        "{ENV_TIMEOUT_SECS} must be a positive duration, got {secs}"
                    ))
                })?;
            config.http.timeout = Some(timeout);
        }

        Ok(config)
    }

    pub fn registry(&self) -> ProviderRegistry {
        match self.mode {
            DispatchMode::Direct => ProviderRegistry::direct(&self.endpoints),
            DispatchMode::Aggregator => ProviderRegistry::aggregated(&self.endpoints.aggregator),
        }
    }

    /// Dispatcher for the configured mode, with a key pool when pool keys are set.
    pub fn build_dispatcher(&self) -> Result<Dispatcher, PromptError> {
        let registry = self.registry();
        if !registry.contains(&self.default_model) {
            return Err(PromptError::ConfigurationError(format!(
                "Default model '{}' is not registered",
                self.default_model
            )));
        }

        let mut dispatcher = Dispatcher::with_http_config(registry, &self.http)?;
        if !self.pool_keys.is_empty() {
            let pool = KeyPool::new(self.pool_keys.iter().map(|k| k.expose_secret().to_string()));
            dispatcher = dispatcher.with_key_pool(Arc::new(pool));
        }
        tracing::debug!(mode = ?self.mode, pool_keys = self.pool_keys.len(), "dispatcher configured");
        Ok(dispatcher)
    }

    pub fn aggregator_client(&self) -> Result<AggregatorClient, PromptError> {
        let client = build_http_client_from_config(&self.http)?;
        Ok(AggregatorClient::new(
            self.endpoints.aggregator.clone(),
            Arc::new(ReqwestTransport::new(client)),
        ))
    }
}

fn deserialize_secrets<'de, D>(deserializer: D) -> Result<Vec<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .map(SecretString::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_are_direct_with_public_endpoints() {
        let config = AppConfig::default();
        assert_eq!(config.mode, DispatchMode::Direct);
        assert_eq!(
            config.endpoints.gemini,
            "https://generativelanguage.googleapis.com/v1beta"
        );
        assert_eq!(config.endpoints.aggregator, "https://mp-server.replit.app/api");
        assert_eq!(config.default_model, DEFAULT_MODEL);
        assert!(config.http.timeout.is_none());
    }

    #[test]
    fn env_overrides() {
        let config = AppConfig::from_vars(vars(&[
            (ENV_MODE, "Aggregator"),
            (ENV_AGGREGATOR_URL, "http://localhost:3001/api"),
            (ENV_POOL_KEYS, "k1, ,k2"),
            (ENV_TIMEOUT_SECS, "2.5"),
        ]))
        .unwrap();
        assert_eq!(config.mode, DispatchMode::Aggregator);
        assert_eq!(config.endpoints.aggregator, "http://localhost:3001/api");
        assert_eq!(config.pool_keys.len(), 2);
        assert_eq!(config.pool_keys[1].expose_secret(), "k2");
        assert_eq!(config.http.timeout, Some(Duration::from_millis(2500)));
    }

    #[test]
    fn bad_env_values_are_configuration_errors() {
        let err = AppConfig::from_vars(vars(&[(ENV_MODE, "hybrid")])).unwrap_err();
        assert!(matches!(err, PromptError::ConfigurationError(_)));

        let err = AppConfig::from_vars(vars(&[(ENV_TIMEOUT_SECS, "soon")])).unwrap_err();
        assert!(matches!(err, PromptError::ConfigurationError(_)));

        for secs in ["0", "-3", "1e30", "NaN"] {
            let err = AppConfig::from_vars(vars(&[(ENV_TIMEOUT_SECS, secs)])).unwrap_err();
            assert!(matches!(err, PromptError::ConfigurationError(_)), "{secs}");
        }

        let err = AppConfig::from_json_str(r#"{ "http": { "timeout": 1e30 } }"#).unwrap_err();
        assert!(matches!(err, PromptError::ConfigurationError(_)));
    }

    #[test]
    fn json_document_is_camel_case_and_partial() {
        let config = AppConfig::from_json_str(
            r#"{
                "mode": "direct",
                "endpoints": { "gemini": "http://127.0.0.1:9000/v1beta" },
                "poolKeys": ["a", "b"],
                "defaultModel": "GPT-4o"
            }"#,
        )
        .unwrap();
        assert_eq!(config.endpoints.gemini, "http://127.0.0.1:9000/v1beta");
        assert_eq!(config.endpoints.openai, "https://api.openai.com/v1");
        assert_eq!(config.pool_keys.len(), 2);
        assert_eq!(config.default_model, "GPT-4o");
    }

    #[test]
    fn build_dispatcher_attaches_pool_only_with_keys() {
        let d = AppConfig::default().build_dispatcher().unwrap();
        assert!(d.key_pool().is_none());

        let config = AppConfig::from_vars(vars(&[(ENV_POOL_KEYS, "k1,k2")])).unwrap();
        let d = config.build_dispatcher().unwrap();
        assert_eq!(d.key_pool().unwrap().len(), 2);
    }

    #[test]
    fn unknown_default_model_is_rejected() {
        let config = AppConfig::from_vars(vars(&[(ENV_DEFAULT_MODEL, "Nope")])).unwrap();
        assert!(matches!(
            config.build_dispatcher(),
            Err(PromptError::ConfigurationError(_))
        ));
    }

    #[test]
    fn debug_redacts_pool_keys() {
        let config = AppConfig::from_vars(vars(&[(ENV_POOL_KEYS, "super-secret")])).unwrap();
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
