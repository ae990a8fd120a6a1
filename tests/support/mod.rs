//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use modi_prompt::error::PromptError;
use modi_prompt::execution::http::{HttpTransport, HttpTransportRequest, HttpTransportResponse};
use reqwest::header::HeaderMap;
use serde_json::Value;

type Responder = dyn Fn(&HttpTransportRequest) -> (u16, String) + Send + Sync;

/// Transport that records every request and answers from a closure.
pub struct StubTransport {
    responder: Box<Responder>,
    requests: Mutex<Vec<HttpTransportRequest>>,
}

impl StubTransport {
    pub fn new<F>(responder: F) -> Arc<Self>
    where
        F: Fn(&HttpTransportRequest) -> (u16, String) + Send + Sync + 'static,
    {
        Arc::new(Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn json(status: u16, body: Value) -> Arc<Self> {
        let body = body.to_string();
        Self::new(move |_| (status, body.clone()))
    }

    pub fn text(status: u16, body: &str) -> Arc<Self> {
        let body = body.to_string();
        Self::new(move |_| (status, body.clone()))
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<HttpTransportRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpTransportRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl HttpTransport for StubTransport {
    async fn execute(
        &self,
        request: HttpTransportRequest,
    ) -> Result<HttpTransportResponse, PromptError> {
        let (status, body) = (self.responder)(&request);
        self.requests.lock().unwrap().push(request);
        Ok(HttpTransportResponse {
            status,
            headers: HeaderMap::new(),
            body: body.into_bytes(),
        })
    }
}

/// Transport that fails at the network level.
pub struct OfflineTransport;

#[async_trait]
impl HttpTransport for OfflineTransport {
    async fn execute(
        &self,
        _request: HttpTransportRequest,
    ) -> Result<HttpTransportResponse, PromptError> {
        Err(PromptError::NetworkError("connection refused".into()))
    }
}

pub fn gemini_success(text: &str) -> Value {
    serde_json::json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

pub fn openai_success(text: &str) -> Value {
    serde_json::json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": text },
            "finish_reason": "stop"
        }]
    })
}

pub fn anthropic_success(text: &str) -> Value {
    serde_json::json!({
        "id": "msg_01",
        "type": "message",
        "role": "assistant",
        "content": [{ "type": "text", "text": text }],
        "stop_reason": "end_turn"
    })
}
