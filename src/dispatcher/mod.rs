//! Request Dispatcher
//!
//! `generate` is the single entry point the presentation layer calls:
//! 1. Reject empty credential/concept before any network call
//! 2. Resolve the adapter by display name
//! 3. Prepare URL, headers, and body with the credential placed per family
//! 4. Send exactly one request through the transport
//! 5. Classify non-success responses, otherwise extract the generated text
//!
//! In shared-credential mode (`generate_pooled`) the credential comes from the
//! injected `KeyPool`; keys the provider rejects are marked failed and the
//! next available key is used.

use std::sync::Arc;

use secrecy::ExposeSecret;
use uuid::Uuid;

use crate::error::{
    MISSING_CONCEPT_MESSAGE, MISSING_CREDENTIAL_MESSAGE, PromptError, classify_http_error,
};
use crate::execution::http::{
    HttpTransport, HttpTransportRequest, ReqwestTransport, build_http_client_from_config,
};
use crate::key_pool::KeyPool;
use crate::providers::{ProviderAdapter, mask_credential};
use crate::registry::ProviderRegistry;
use crate::types::{GenerationOptions, HttpConfig};

#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ProviderRegistry>,
    transport: Arc<dyn HttpTransport>,
    key_pool: Option<Arc<KeyPool>>,
}

static_assertions::assert_impl_all!(Dispatcher: Send, Sync);

impl Dispatcher {
    pub fn new(registry: ProviderRegistry, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            registry: Arc::new(registry),
            transport,
            key_pool: None,
        }
    }

    /// Dispatcher over a `reqwest` client built from `http`.
    pub fn with_http_config(
        registry: ProviderRegistry,
        http: &HttpConfig,
    ) -> Result<Self, PromptError> {
        let client = build_http_client_from_config(http)?;
        Ok(Self::new(registry, Arc::new(ReqwestTransport::new(client))))
    }

    /// Attach a shared credential pool for `generate_pooled`.
    pub fn with_key_pool(mut self, pool: Arc<KeyPool>) -> Self {
        self.key_pool = Some(pool);
        self
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn key_pool(&self) -> Option<&Arc<KeyPool>> {
        self.key_pool.as_ref()
    }

    /// Generate a video prompt with a user-supplied credential.
    pub async fn generate(
        &self,
        model: &str,
        concept: &str,
        options: &GenerationOptions,
        credential: &str,
    ) -> Result<String, PromptError> {
        if credential.trim().is_empty() {
            return Err(PromptError::InvalidInput(
                MISSING_CREDENTIAL_MESSAGE.to_string(),
            ));
        }
        validate_concept(concept)?;
        let adapter = self.registry.resolve(model)?;
        self.execute(adapter, concept, options, credential).await
    }

    /// Generate with credentials drawn from the shared pool.
    pub async fn generate_pooled(
        &self,
        model: &str,
        concept: &str,
        options: &GenerationOptions,
    ) -> Result<String, PromptError> {
        let pool = self.key_pool.as_ref().ok_or_else(|| {
            PromptError::NoAvailableKeys("no shared key pool is configured".to_string())
        })?;
        validate_concept(concept)?;
        let adapter = self.registry.resolve(model)?;

        // Terminates: every retry marks one more pool key failed.
        loop {
            let Some(key) = pool.next_available() else {
                return Err(PromptError::NoAvailableKeys(format!(
                    "all {} shared keys are marked failed",
                    pool.len()
                )));
            };
            match self
                .execute(adapter, concept, options, key.expose_secret())
                .await
            {
                Err(e) if e.is_credential_rejection() => {
                    pool.mark_failed(key.expose_secret());
                    tracing::debug!(
                        model,
                        remaining = pool.stats().available_keys,
                        "provider rejected shared key, trying next"
                    );
                }
                other => return other,
            }
        }
    }

    /// `generate`, with any failure rendered as the message the UI displays.
    pub async fn generate_for_display(
        &self,
        model: &str,
        concept: &str,
        options: &GenerationOptions,
        credential: &str,
    ) -> Result<String, String> {
        self.generate(model, concept, options, credential)
            .await
            .map_err(|e| e.user_message())
    }

    async fn execute(
        &self,
        adapter: &ProviderAdapter,
        concept: &str,
        options: &GenerationOptions,
        credential: &str,
    ) -> Result<String, PromptError> {
        let request_id = Uuid::new_v4();
        let provider = adapter.family_id();
        let prepared = adapter.prepare(concept, options, credential)?;

        tracing::debug!(
            %request_id,
            provider,
            model = adapter.display_name(),
            endpoint = %adapter.endpoint(),
            key = %mask_credential(credential),
            "sending generation request"
        );

        let response = self
            .transport
            .execute(HttpTransportRequest::post_json(
                prepared.url,
                prepared.headers,
                prepared.body,
            ))
            .await
            .inspect_err(|e| {
                tracing::warn!(%request_id, provider, error = %e, "transport failure");
            })?;

        if !response.is_success() {
            let error = classify_http_error(response.status, &response.text());
            tracing::warn!(
                %request_id,
                provider,
                status = response.status,
                error = %error,
                "provider returned an error"
            );
            return Err(error);
        }

        let body = response.json()?;
        let text = adapter.parse_response(&body).inspect_err(|e| {
            tracing::warn!(%request_id, provider, error = %e, "unexpected response shape");
        })?;

        tracing::info!(
            %request_id,
            provider,
            model = adapter.display_name(),
            chars = text.len(),
            "generation completed"
        );
        Ok(text)
    }
}

fn validate_concept(concept: &str) -> Result<(), PromptError> {
    if concept.trim().is_empty() {
        return Err(PromptError::InvalidInput(MISSING_CONCEPT_MESSAGE.to_string()));
    }
    Ok(())
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("models", &self.registry.len())
            .field("key_pool", &self.key_pool)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::http::HttpTransportResponse;
    use async_trait::async_trait;

    /// Fails the test if any request reaches it.
    struct UnreachableTransport;

    #[async_trait]
    impl HttpTransport for UnreachableTransport {
        async fn execute(
            &self,
            request: HttpTransportRequest,
        ) -> Result<HttpTransportResponse, PromptError> {
            panic!("unexpected network call to {}", request.url);
        }
    }

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(ProviderRegistry::builtin(), Arc::new(UnreachableTransport))
    }

    #[test]
    fn empty_inputs_fail_before_network() {
        let d = dispatcher();
        let opts = GenerationOptions::default();

        let err = tokio_test::block_on(d.generate("Gemini 2.5 Flash", "", &opts, "key"))
            .unwrap_err();
        assert!(matches!(err, PromptError::InvalidInput(ref m) if m == MISSING_CONCEPT_MESSAGE));

        let err = tokio_test::block_on(d.generate("Gemini 2.5 Flash", "volcano", &opts, "  "))
            .unwrap_err();
        assert!(
            matches!(err, PromptError::InvalidInput(ref m) if m == MISSING_CREDENTIAL_MESSAGE)
        );
    }

    #[test]
    fn unknown_model_fails_before_network() {
        let err = tokio_test::block_on(dispatcher().generate(
            "Not A Model",
            "volcano",
            &GenerationOptions::default(),
            "key",
        ))
        .unwrap_err();
        assert!(matches!(err, PromptError::UnknownModel(_)));
    }

    #[test]
    fn pooled_without_pool_is_no_available_keys() {
        let err = tokio_test::block_on(dispatcher().generate_pooled(
            "Gemini 2.5 Flash",
            "volcano",
            &GenerationOptions::default(),
        ))
        .unwrap_err();
        assert!(matches!(err, PromptError::NoAvailableKeys(_)));
    }

    #[test]
    fn display_errors_are_user_messages() {
        let msg = tokio_test::block_on(dispatcher().generate_for_display(
            "Gemini 2.5 Flash",
            "volcano",
            &GenerationOptions::default(),
            "",
        ))
        .unwrap_err();
        assert_eq!(msg, MISSING_CREDENTIAL_MESSAGE);
    }

    #[test]
    fn debug_omits_transport_and_keys() {
        let d = dispatcher().with_key_pool(Arc::new(KeyPool::new(["sk-hidden-key-1"])));
        let rendered = format!("{d:?}");
        assert!(rendered.contains("models: 8"));
        assert!(!rendered.contains("sk-hidden-key-1"));
    }
}
