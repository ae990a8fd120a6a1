//! Backend aggregator client
//!
//! Read-only side of the aggregator's HTTP contract:
//! - `GET /models` → `[{name, icon}]`
//! - `GET /key-stats` → `{totalKeys, failedKeys, availableKeys}`
//!
//! Generation (`POST /generate-prompt`) goes through `Dispatcher` over
//! `ProviderRegistry::aggregated`.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::error::{PromptError, classify_http_error};
use crate::execution::http::{HttpTransport, HttpTransportRequest, HttpTransportResponse};
use crate::providers::join_url;
use crate::types::{KeyStats, ModelInfo};

#[derive(Clone)]
pub struct AggregatorClient {
    base_url: String,
    transport: Arc<dyn HttpTransport>,
}

impl AggregatorClient {
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Models the aggregator currently serves.
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>, PromptError> {
        self.get_json("models").await
    }

    /// `list_models`, falling back to an empty list when the aggregator is
    /// unreachable or misbehaving. The form then simply offers no models.
    pub async fn list_models_or_empty(&self) -> Vec<ModelInfo> {
        match self.list_models().await {
            Ok(models) => models,
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch models, using empty list");
                Vec::new()
            }
        }
    }

    /// Shared-credential counters on the aggregator side.
    pub async fn key_stats(&self) -> Result<KeyStats, PromptError> {
        self.get_json("key-stats").await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, PromptError> {
        let url = join_url(&self.base_url, path);
        tracing::debug!(%url, "aggregator GET");
        let response = self
            .transport
            .execute(HttpTransportRequest::get(url))
            .await?;
        let response = ensure_success(response)?;
        serde_json::from_slice(&response.body).map_err(|e| {
            PromptError::ParseError(format!("Unexpected aggregator response for /{path}: {e}"))
        })
    }
}

fn ensure_success(response: HttpTransportResponse) -> Result<HttpTransportResponse, PromptError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(classify_http_error(response.status, &response.text()))
    }
}

impl std::fmt::Debug for AggregatorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AggregatorClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}
