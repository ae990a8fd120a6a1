//! HTTP Headers Utility
//!
//! Header building shared by all provider families.

use crate::error::PromptError;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use std::collections::HashMap;

/// HTTP header builder for API requests
pub struct HttpHeaderBuilder {
    headers: HeaderMap,
}

impl HttpHeaderBuilder {
    /// Create a new header builder
    pub fn new() -> Self {
        Self {
            headers: HeaderMap::new(),
        }
    }

    /// Add Bearer token authorization
    pub fn with_bearer_auth(mut self, token: &str) -> Result<Self, PromptError> {
        let auth_value = format!("Bearer {token}");
        self.headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth_value)
                .map_err(|e| PromptError::InvalidInput(format!("Invalid API key format: {e}")))?,
        );
        Ok(self)
    }

    /// Add a credential under a provider-specific header (e.g. `x-api-key`)
    pub fn with_custom_auth(mut self, header_name: &str, value: &str) -> Result<Self, PromptError> {
        let name = parse_header_name(header_name)?;
        self.headers.insert(
            name,
            HeaderValue::from_str(value)
                .map_err(|e| PromptError::InvalidInput(format!("Invalid API key format: {e}")))?,
        );
        Ok(self)
    }

    /// Add JSON content type
    pub fn with_json_content_type(mut self) -> Self {
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self
    }

    /// Add a custom header
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, PromptError> {
        let header_name = parse_header_name(name)?;
        self.headers.insert(
            header_name,
            HeaderValue::from_str(value).map_err(|e| {
                PromptError::ConfigurationError(format!("Invalid header value '{value}': {e}"))
            })?,
        );
        Ok(self)
    }

    /// Add multiple custom headers from a HashMap
    pub fn with_custom_headers(
        mut self,
        custom_headers: &HashMap<String, String>,
    ) -> Result<Self, PromptError> {
        for (key, value) in custom_headers {
            self = self.with_header(key, value)?;
        }
        Ok(self)
    }

    /// Build the final HeaderMap
    pub fn build(self) -> HeaderMap {
        self.headers
    }
}

impl Default for HttpHeaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_header_name(name: &str) -> Result<HeaderName, PromptError> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| PromptError::ConfigurationError(format!("Invalid header name '{name}': {e}")))
}
