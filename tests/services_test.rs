//! Integration tests for the endpoint services.
//!
//! Each service is checked against a mock server for its HTTP verb, path and
//! payload shape. Retry behaviour of non-streaming calls is covered at the end.

mod common;

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use common::{builder_for, client_for};
use tabby_client::models::{
    ChatCompletionRequest, ChatMessage, ChatMessageRole, CompletionRequest, DownloadRequest,
    EmbeddingModelLoadRequest, EmbeddingsRequest, LoraLoadInfo, LoraLoadRequest, ModelLoadRequest,
    SamplerOverrideSwitchRequest, TemplateSwitchRequest, TokenDecodeRequest, TokenEncodeRequest,
};
use tabby_client::{ErrorKind, SimpleRetryPolicy};
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn instant_retries(max: u32) -> SimpleRetryPolicy {
    SimpleRetryPolicy::new(max).with_delay(|_| Duration::ZERO)
}

fn model_list() -> serde_json::Value {
    serde_json::json!({
        "object": "list",
        "data": [
            { "id": "llama-3-8b", "object": "model", "created": 1, "owned_by": "tabbyAPI" },
            { "id": "mistral-7b", "object": "model", "created": 2, "owned_by": "tabbyAPI" }
        ]
    })
}

// ============================================================================
// Generation
// ============================================================================

#[tokio::test]
async fn test_completion_forces_stream_off() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/completions"))
        .and(body_json(serde_json::json!({ "prompt": "Once upon", "max_tokens": 16 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "cmpl-9",
            "object": "text_completion",
            "created": 1700000000,
            "model": "llama-3-8b",
            "choices": [{ "text": " a time", "index": 0, "finish_reason": "stop" }],
            "usage": { "prompt_tokens": 2, "completion_tokens": 3, "total_tokens": 5 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut request = CompletionRequest::new("Once upon");
    request.max_tokens = Some(16);
    request.stream = true;

    let response = client.completions().create(&request).await.unwrap();
    assert_eq!(response.choices[0].text, " a time");
    assert_eq!(response.choices[0].finish_reason.as_deref(), Some("stop"));
    assert_eq!(response.usage.unwrap().total_tokens, 5);
}

#[tokio::test]
async fn test_chat_completion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(serde_json::json!({
            "messages": [
                { "role": "system", "content": "Be brief." },
                { "role": "user", "content": "Hi" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1700000000,
            "model": "llama-3-8b",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "Hello!" },
                "finish_reason": "stop"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request =
        ChatCompletionRequest::new(vec![ChatMessage::system("Be brief."), ChatMessage::user("Hi")]);
    let response = client.chat().create(&request).await.unwrap();

    let message = &response.choices[0].message;
    assert_eq!(message.role, ChatMessageRole::Assistant);
    assert_eq!(message, &ChatMessage::assistant("Hello!"));

    let requests = server.received_requests().await.unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(sent.get("stream").is_none());
}

#[tokio::test]
async fn test_embeddings() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/embeddings"))
        .and(body_partial_json(serde_json::json!({ "input": ["a", "b"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "object": "list",
            "data": [
                { "object": "embedding", "embedding": [0.5, -0.25], "index": 0 },
                { "object": "embedding", "embedding": [1.0, 0.0], "index": 1 }
            ],
            "model": "bge",
            "usage": { "prompt_tokens": 2, "total_tokens": 2 }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = EmbeddingsRequest::new(vec!["a".to_string(), "b".to_string()]);
    let response = client.embeddings().create(&request).await.unwrap();

    assert_eq!(response.data.len(), 2);
    assert_eq!(response.usage.total_tokens, 2);
}

// ============================================================================
// Model management
// ============================================================================

#[tokio::test]
async fn test_model_listing_endpoints() {
    let server = MockServer::start().await;
    for route in ["/v1/models", "/v1/models/draft", "/v1/models/embedding"] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(model_list()))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = client_for(&server);
    let models = client.models();
    assert_eq!(models.list().await.unwrap().data[0].id, "llama-3-8b");
    assert_eq!(models.list_draft().await.unwrap().data.len(), 2);
    assert_eq!(models.list_embedding().await.unwrap().data[1].id, "mistral-7b");
}

#[tokio::test]
async fn test_current_model_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models/current"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "llama-3-8b",
            "object": "model",
            "created": 1,
            "owned_by": "tabbyAPI",
            "parameters": { "max_seq_len": 8192, "cache_mode": "Q4" }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/models/embedding/current"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "bge" })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/models/current"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/models/embedding/current"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let card = client.models().get().await.unwrap();
    let params = card.parameters.unwrap();
    assert_eq!(params.max_seq_len, Some(8192));
    assert_eq!(params.cache_mode.as_deref(), Some("Q4"));

    assert_eq!(client.models().get_embedding().await.unwrap().id, "bge");
    client.models().unload().await.unwrap();
    client.models().unload_embedding().await.unwrap();
}

#[tokio::test]
async fn test_model_load_and_download() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/models/load"))
        .and(body_json(serde_json::json!({ "model_name": "llama-3-8b", "max_seq_len": 4096 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "model_type": "model", "module": 10, "modules": 10, "status": "finished"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/models/embedding/load"))
        .and(body_partial_json(serde_json::json!({ "embedding_model_name": "bge" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "model_type": "embedding_model", "module": 1, "modules": 1, "status": "finished"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/models/download"))
        .and(body_partial_json(serde_json::json!({ "repo_id": "org/model" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "download_path": "/models/model" })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut request = ModelLoadRequest::new("llama-3-8b");
    request.max_seq_len = Some(4096);
    assert!(client.models().load(&request).await.unwrap().is_finished());

    let embedding = client
        .models()
        .load_embedding(&EmbeddingModelLoadRequest::new("bge"))
        .await
        .unwrap();
    assert_eq!(embedding.model_type, "embedding_model");

    let download = client
        .models()
        .download(&DownloadRequest::new("org/model"))
        .await
        .unwrap();
    assert_eq!(download.download_path, "/models/model");
}

#[tokio::test]
async fn test_model_props() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models/props"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "total_slots": 1,
            "chat_template": "{{ messages }}",
            "default_generation_settings": { "n_ctx": 8192 }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let props = client.models().props().await.unwrap();
    assert_eq!(props.total_slots, 1);
    assert_eq!(props.default_generation_settings.map(|s| s.n_ctx), Some(8192));
}

// ============================================================================
// Adapters, templates, sampler overrides
// ============================================================================

#[tokio::test]
async fn test_lora_endpoints() {
    let server = MockServer::start().await;
    let list = serde_json::json!({
        "object": "list",
        "data": [{
            "id": "style",
            "object": "lora",
            "created": 1,
            "owned_by": "tabbyAPI",
            "scaling": 0.8
        }]
    });
    Mock::given(method("GET"))
        .and(path("/v1/loras"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list.clone()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/loras/active"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/loras/load"))
        .and(body_partial_json(serde_json::json!({
            "loras": [{ "name": "style", "scaling": 0.8 }]
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "success": ["style"], "failure": [] })),
        )
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/loras/active"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let lora = client.lora();
    assert_eq!(lora.list().await.unwrap().data[0].scaling, Some(0.8));
    assert_eq!(lora.active().await.unwrap().data[0].id, "style");

    let request = LoraLoadRequest {
        loras: vec![LoraLoadInfo::new("style").with_scaling(0.8)],
        ..Default::default()
    };
    let loaded = lora.load(&request).await.unwrap();
    assert_eq!(loaded.success, vec!["style"]);
    assert!(loaded.failure.is_empty());

    lora.unload().await.unwrap();
}

#[tokio::test]
async fn test_template_endpoints() {
    let server = MockServer::start().await;
    let templates = serde_json::json!({ "object": "list", "data": ["chatml", "llama3"] });
    Mock::given(method("GET"))
        .and(path("/v1/templates"))
        .respond_with(ResponseTemplate::new(200).set_body_json(templates))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/templates/switch"))
        .and(body_json(serde_json::json!({ "prompt_template_name": "chatml" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/templates/active"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(client.templates().list().await.unwrap().data, vec!["chatml", "llama3"]);
    client
        .templates()
        .switch(&TemplateSwitchRequest::new("chatml"))
        .await
        .unwrap();
    client.templates().unload().await.unwrap();
}

#[tokio::test]
async fn test_sampler_override_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/sampler/overrides"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "selected_preset": "safe",
            "overrides": { "temperature": { "override": 0.7, "force": false } },
            "presets": ["safe", "creative"]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/sampler/overrides/switch"))
        .and(body_json(serde_json::json!({ "preset": "creative" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/sampler/overrides/active"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let overrides = client.sampling().list_overrides().await.unwrap();
    assert_eq!(overrides.selected_preset.as_deref(), Some("safe"));
    assert_eq!(overrides.presets.len(), 2);
    assert!(overrides.overrides.contains_key("temperature"));

    client
        .sampling()
        .switch_override(&SamplerOverrideSwitchRequest::preset("creative"))
        .await
        .unwrap();
    client.sampling().unload_override().await.unwrap();
}

// ============================================================================
// Tokens, health, permissions
// ============================================================================

#[tokio::test]
async fn test_token_round_trip_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/tokens/encode"))
        .and(body_json(serde_json::json!({ "text": "hello" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "tokens": [15339], "length": 1 })),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/tokens/decode"))
        .and(body_json(serde_json::json!({ "tokens": [15339] })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "text": "hello" })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let encoded = client.tokens().encode(&TokenEncodeRequest::new("hello")).await.unwrap();
    assert_eq!(encoded.tokens, vec![15339]);
    assert_eq!(encoded.length, 1);

    let decoded = client
        .tokens()
        .decode(&TokenDecodeRequest::new(encoded.tokens))
        .await
        .unwrap();
    assert_eq!(decoded.text, "hello");
}

#[tokio::test]
async fn test_health_and_permission() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/health"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "status": "healthy" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/auth/permission"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "permission": "admin" })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let health = client.health().check().await.unwrap();
    assert!(health.is_healthy());
    assert!(health.issues.is_empty());
    assert!(client.auth().permission().await.unwrap().is_admin());
}

// ============================================================================
// Retries
// ============================================================================

#[tokio::test]
async fn test_retry_policy_retries_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/health"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/health"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "status": "healthy" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = builder_for(&server).with_retry_policy(instant_retries(3)).build().unwrap();
    let health = client.health().check().await.unwrap();
    assert!(health.is_healthy());
}

#[tokio::test]
async fn test_retry_budget_is_bounded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let client = builder_for(&server).with_retry_policy(instant_retries(2)).build().unwrap();
    let err = client.models().list().await.unwrap_err();
    assert!(err.is(ErrorKind::Server));
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/tokens/encode"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(serde_json::json!({ "message": "bad text" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = builder_for(&server).with_retry_policy(instant_retries(5)).build().unwrap();
    let err = client.tokens().encode(&TokenEncodeRequest::new("x")).await.unwrap_err();
    assert!(err.is(ErrorKind::InvalidRequest));
}

#[tokio::test]
async fn test_custom_retry_predicate() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(model_list()))
        .mount(&server)
        .await;

    let seen = Arc::new(AtomicU32::new(0));
    let counter = seen.clone();
    let policy = instant_retries(1).with_retryable(move |err| {
        counter.fetch_add(1, Ordering::SeqCst);
        err.as_api_error().is_some_and(|api| api.status_code == 429)
    });

    let client = builder_for(&server).with_retry_policy(policy).build().unwrap();
    assert_eq!(client.models().list().await.unwrap().data.len(), 2);
    assert_eq!(seen.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_streams_are_never_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/completions"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let client = builder_for(&server).with_retry_policy(instant_retries(3)).build().unwrap();
    let err = client
        .completions()
        .create_stream(&CompletionRequest::new("x"))
        .await
        .unwrap_err();
    assert!(err.is_retryable());
}
