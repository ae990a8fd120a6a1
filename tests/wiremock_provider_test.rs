//! Mock API tests over real HTTP.
//!
//! Each provider family is pointed at a wiremock server and driven through the
//! `reqwest` transport, so header names, query strings and bodies are checked
//! as they appear on the wire.

mod support;

use modi_prompt::prelude::*;
use serde_json::json;
use support::{anthropic_success, gemini_success, openai_success};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn endpoints_for(server: &MockServer) -> ProviderEndpoints {
    let base = server.uri();
    ProviderEndpoints {
        gemini: format!("{base}/v1beta"),
        openai: format!("{base}/openai/v1"),
        anthropic: format!("{base}/anthropic/v1"),
        openrouter: format!("{base}/openrouter/api/v1"),
        aggregator: format!("{base}/api"),
    }
}

fn direct_dispatcher(server: &MockServer) -> Dispatcher {
    Dispatcher::with_http_config(
        ProviderRegistry::direct(&endpoints_for(server)),
        &HttpConfig::default(),
    )
    .unwrap()
}

#[tokio::test]
async fn test_gemini_key_travels_as_query_param() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .and(query_param("key", "AIza-test"))
        .and(body_partial_json(json!({
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_success("{\"title\":\"Tide\"}")))
        .expect(1)
        .mount(&server)
        .await;

    let text = direct_dispatcher(&server)
        .generate("Gemini 2.5 Flash", "tidal pools", &GenerationOptions::default(), "AIza-test")
        .await
        .unwrap();
    assert_eq!(text, "{\"title\":\"Tide\"}");
}

#[tokio::test]
async fn test_openai_uses_bearer_and_json_mode() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({
            "model": "gpt-4o",
            "response_format": { "type": "json_object" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(openai_success("gpt says hi")))
        .expect(1)
        .mount(&server)
        .await;

    let text = direct_dispatcher(&server)
        .generate("GPT-4o", "neon alley", &GenerationOptions::default(), "sk-test")
        .await
        .unwrap();
    assert_eq!(text, "gpt says hi");
}

#[tokio::test]
async fn test_openrouter_sends_title_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openrouter/api/v1/chat/completions"))
        .and(header("authorization", "Bearer or-key"))
        .and(header("x-title", "Modi Prompt"))
        .and(body_partial_json(json!({ "model": "openrouter/auto" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(openai_success("routed")))
        .expect(1)
        .mount(&server)
        .await;

    let text = direct_dispatcher(&server)
        .generate("OpenRouter Auto", "neon alley", &GenerationOptions::default(), "or-key")
        .await
        .unwrap();
    assert_eq!(text, "routed");
}

#[tokio::test]
async fn test_anthropic_headers_and_error_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/anthropic/v1/messages"))
        .and(header("x-api-key", "sk-ant-good"))
        .and(header("anthropic-version", "2023-06-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(anthropic_success("claude text")))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/anthropic/v1/messages"))
        .and(header("x-api-key", "sk-ant-bad"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "type": "error",
            "error": { "type": "authentication_error", "message": "invalid x-api-key" }
        })))
        .mount(&server)
        .await;

    let d = direct_dispatcher(&server);
    let opts = GenerationOptions::default();

    let text = d
        .generate("Claude Sonnet 4", "desert", &opts, "sk-ant-good")
        .await
        .unwrap();
    assert_eq!(text, "claude text");

    let msg = d
        .generate_for_display("Claude Sonnet 4", "desert", &opts, "sk-ant-bad")
        .await
        .unwrap_err();
    assert_eq!(msg, "invalid x-api-key");
}

#[tokio::test]
async fn test_non_json_error_body_uses_status_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let err = direct_dispatcher(&server)
        .generate("GPT-4.1", "desert", &GenerationOptions::default(), "sk-test")
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(502));
    assert_eq!(err.user_message(), "Bad Gateway");
    assert_eq!(err.category(), ErrorCategory::Server);
}

#[tokio::test]
async fn test_aggregator_client_contract() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": "Gemini 2.5 Flash", "icon": "gemini" },
            { "name": "GPT-4o", "icon": "openai" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/key-stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalKeys": 5, "failedKeys": 2, "availableKeys": 3
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/generate-prompt"))
        .and(body_partial_json(json!({
            "model": "GPT-4o",
            "prompt": "city at dawn",
            "apiKey": "user-key",
            "options": { "promptLength": "300" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "prompt": "{\"title\":\"Dawn\"}" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = AggregatorClient::new(
        format!("{}/api", server.uri()),
        std::sync::Arc::new(ReqwestTransport::default()),
    );

    let models = client.list_models().await.unwrap();
    assert_eq!(models.len(), 2);
    assert_eq!(models[1], ModelInfo { name: "GPT-4o".into(), icon: "openai".into() });

    assert_eq!(
        client.key_stats().await.unwrap(),
        KeyStats { total_keys: 5, failed_keys: 2, available_keys: 3 }
    );

    let dispatcher = Dispatcher::with_http_config(
        ProviderRegistry::aggregated(client.base_url()),
        &HttpConfig::default(),
    )
    .unwrap();
    let options = GenerationOptions::new().with_prompt_length(300u16);
    let prompt = dispatcher
        .generate("GPT-4o", "city at dawn", &options, "user-key")
        .await
        .unwrap();
    assert_eq!(prompt, "{\"title\":\"Dawn\"}");
}

#[tokio::test]
async fn test_aggregator_model_listing_falls_back_to_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/models"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "db down" })))
        .mount(&server)
        .await;

    let client = AggregatorClient::new(
        format!("{}/api", server.uri()),
        std::sync::Arc::new(ReqwestTransport::default()),
    );

    match client.list_models().await {
        Err(PromptError::ProviderError { status, message, .. }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "db down");
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(client.list_models_or_empty().await.is_empty());
}
