//! Wiremock tests for the Gemini client.
//!
//! The client drives its own runtime, so each test starts the mock server on a
//! separate runtime and calls the client from plain synchronous code.

use tokio::runtime::Runtime;
use vota_informado::analysis::{
    AnalysisService, GeminiClient, GenerationError, ReplySource, TextGenerator,
    CHAT_FAILED_MESSAGE,
};
use vota_informado::config::GeminiConfig;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "gemini-test";
const ENDPOINT: &str = "/v1beta/models/gemini-test:generateContent";

fn start_server(runtime: &Runtime, response: ResponseTemplate) -> MockServer {
    runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(response)
            .mount(&server)
            .await;
        server
    })
}

#[test]
fn returns_concatenated_candidate_text() {
    let runtime = Runtime::new().expect("test runtime");
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": "¿Hola?"}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {
                        "role": "model",
                        "parts": [{"text": "Hola, "}, {"text": "¿en qué te ayudo?"}]
                    }
                }]
            })))
            .mount(&server)
            .await;
        server
    });

    let client =
        GeminiClient::with_base_url("test-key", MODEL, server.uri()).expect("client builds");
    let text = client.generate("¿Hola?").expect("generation succeeds");
    assert_eq!(text, "Hola, ¿en qué te ayudo?");
}

#[test]
fn api_errors_surface_status_and_message() {
    let runtime = Runtime::new().expect("test runtime");
    let server = start_server(
        &runtime,
        ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "error": {"code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED"}
        })),
    );

    let client =
        GeminiClient::with_base_url("test-key", MODEL, server.uri()).expect("client builds");
    match client.generate("prompt") {
        Err(GenerationError::Api { status, message }) => {
            assert_eq!(status, 429);
            assert_eq!(message, "Resource has been exhausted");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[test]
fn empty_candidates_are_an_error() {
    let runtime = Runtime::new().expect("test runtime");
    let server = start_server(
        &runtime,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"candidates": []})),
    );

    let client =
        GeminiClient::with_base_url("test-key", MODEL, server.uri()).expect("client builds");
    assert!(matches!(
        client.generate("prompt"),
        Err(GenerationError::EmptyResponse)
    ));
}

#[test]
fn service_turns_backend_failures_into_fallbacks() {
    let runtime = Runtime::new().expect("test runtime");
    let server = start_server(&runtime, ResponseTemplate::new(500));

    let client =
        GeminiClient::with_base_url("test-key", MODEL, server.uri()).expect("client builds");
    let service = AnalysisService::new(client);
    let reply = service.chat("¿Pregunta?", "contexto").expect("service idle");

    assert_eq!(reply.source, ReplySource::Fallback);
    assert_eq!(reply.text, CHAT_FAILED_MESSAGE);
}

#[test]
fn config_without_key_builds_no_client() {
    let config = GeminiConfig {
        api_key: None,
        model: MODEL.to_string(),
        base_url: "http://localhost:1".to_string(),
    };
    assert!(GeminiClient::from_config(&config)
        .expect("no client needed")
        .is_none());

    let config = GeminiConfig {
        api_key: Some("test-key".to_string()),
        ..config
    };
    let client = GeminiClient::from_config(&config)
        .expect("client builds")
        .expect("key configured");
    assert_eq!(client.model(), MODEL);
}
