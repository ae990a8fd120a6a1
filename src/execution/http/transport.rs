//! HTTP transport abstraction.
//!
//! The dispatcher never talks to `reqwest` directly. It hands a fully prepared
//! request to an injectable transport, which lets tests observe the final
//! URL/headers/body and answer with a synthetic response.

use crate::error::PromptError;
use async_trait::async_trait;
use reqwest::header::HeaderMap;

/// HTTP method subset used by the generation and aggregator contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Transport-level request data.
#[derive(Debug, Clone)]
pub struct HttpTransportRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HeaderMap,
    /// JSON body; `None` for GET.
    pub body: Option<serde_json::Value>,
}

impl HttpTransportRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn post_json(url: impl Into<String>, headers: HeaderMap, body: serde_json::Value) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            headers,
            body: Some(body),
        }
    }
}

/// Transport-level response data.
#[derive(Debug, Clone)]
pub struct HttpTransportResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl HttpTransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as UTF-8 text, lossy.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json(&self) -> Result<serde_json::Value, PromptError> {
        serde_json::from_slice(&self.body)
            .map_err(|e| PromptError::ParseError(format!("Response body is not valid JSON: {e}")))
    }
}

/// Custom HTTP transport.
///
/// Implementations perform exactly one attempt per call; retries, if any, are
/// the caller's decision.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(
        &self,
        request: HttpTransportRequest,
    ) -> Result<HttpTransportResponse, PromptError>;
}

/// Production transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(
        &self,
        request: HttpTransportRequest,
    ) -> Result<HttpTransportResponse, PromptError> {
        let builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };
        let mut builder = builder.headers(request.headers);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let headers = resp.headers().clone();
        let body = resp
            .bytes()
            .await
            .map_err(|e| {
                PromptError::NetworkError(format!(
                    "Failed to read response body: {}",
                    e.without_url()
                ))
            })?;

        Ok(HttpTransportResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_helpers() {
        let resp = HttpTransportResponse {
            status: 201,
            headers: HeaderMap::new(),
            body: br#"{"prompt":"ok"}"#.to_vec(),
        };
        assert!(resp.is_success());
        assert_eq!(resp.json().unwrap()["prompt"], "ok");

        let bad = HttpTransportResponse {
            status: 502,
            headers: HeaderMap::new(),
            body: b"<html>".to_vec(),
        };
        assert!(!bad.is_success());
        assert!(matches!(bad.json(), Err(PromptError::ParseError(_))));
    }
}
