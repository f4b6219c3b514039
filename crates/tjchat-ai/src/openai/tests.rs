//! Tests for payload building and the retry loop, using a scripted transport.

use std::time::{Duration, Instant};

use serde_json::json;

use super::client::extract_error_message;
use super::*;
use crate::transport::mock::{network, ok, status, Outcome, ScriptedTransport};
use crate::transport::{TransportError, TransportResponse};
use crate::{AiError, CompletionClient, Message, RequestOptions};

fn config(retry_count: u32) -> ClientConfig {
    ClientConfig::new("https://api.example.com/v1/", "sk-test", "test-model")
        .with_retry_count(retry_count)
        .with_retry_delay(Duration::ZERO)
}

fn client(retry_count: u32, script: Vec<Outcome>) -> OpenAiClient<ScriptedTransport> {
    OpenAiClient::with_transport(config(retry_count), ScriptedTransport::new(script)).unwrap()
}

fn answer(content: &str) -> serde_json::Value {
    json!({"choices": [{"message": {"role": "assistant", "content": content}}]})
}

#[tokio::test]
async fn success_returns_parsed_body_without_retry() {
    let client = client(3, vec![ok(answer("4"))]);

    let response = client
        .chat_completion(&[Message::user("2+2?")], &RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(response, answer("4"));
    assert_eq!(client.transport.calls(), 1);
}

#[tokio::test]
async fn recovers_after_k_failures() {
    let client = client(
        3,
        vec![
            status(500, r#"{"error": {"message": "overloaded"}}"#),
            network("connection reset"),
            ok(answer("done")),
        ],
    );

    let response = client
        .chat_completion(&[Message::user("hi")], &RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(response, answer("done"));
    assert_eq!(client.transport.calls(), 3);
}

#[tokio::test]
async fn exhausted_api_errors_embed_last_upstream_message() {
    let client = client(
        2,
        vec![
            status(429, r#"{"error": {"message": "rate limited"}}"#),
            status(500, r#"{"error": {"message": "overloaded"}}"#),
            status(401, r#"{"error": {"message": "invalid api key"}}"#),
        ],
    );

    let err = client
        .chat_completion(&[Message::user("hi")], &RequestOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, AiError::ApiError(_)));
    assert_eq!(err.to_string(), "API request failed: invalid api key");
    assert_eq!(client.transport.calls(), 3);
}

#[tokio::test]
async fn exhausted_network_errors_use_network_prefix() {
    let client = client(
        1,
        vec![network("connection refused"), network("operation timed out")],
    );

    let err = client
        .chat_completion(&[Message::user("hi")], &RequestOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, AiError::NetworkError(_)));
    assert_eq!(err.to_string(), "Network error: operation timed out");
    assert_eq!(client.transport.calls(), 2);
}

#[tokio::test]
async fn other_transport_failures_use_unexpected_prefix() {
    let client = client(0, vec![Err(TransportError::Other("builder broke".into()))]);

    let err = client
        .completion("hi", &RequestOptions::new())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Unexpected error: builder broke");
}

#[tokio::test]
async fn non_json_success_body_is_unexpected_and_retried() {
    let client = client(
        1,
        vec![
            Ok(TransportResponse {
                status: 200,
                body: "<html>gateway</html>".into(),
            }),
            ok(answer("ok")),
        ],
    );

    let response = client
        .chat_completion(&[Message::user("hi")], &RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(response, answer("ok"));
    assert_eq!(client.transport.calls(), 2);
}

#[tokio::test]
async fn zero_retries_fails_after_single_attempt() {
    let client = client(0, vec![network("connection refused"), ok(answer("never"))]);

    let err = client
        .chat_completion(&[Message::user("hi")], &RequestOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, AiError::NetworkError(_)));
    assert_eq!(client.transport.calls(), 1);
}

#[tokio::test]
async fn retry_delay_is_constant_between_attempts() {
    let delay = Duration::from_millis(30);
    let config = config(2).with_retry_delay(delay);
    let transport = ScriptedTransport::new(vec![
        network("a"),
        network("b"),
        ok(answer("c")),
    ]);
    let client = OpenAiClient::with_transport(config, transport).unwrap();

    let started = Instant::now();
    client
        .chat_completion(&[Message::user("hi")], &RequestOptions::new())
        .await
        .unwrap();
    let elapsed = started.elapsed();

    // Two waits of `delay` each; exponential growth would need at least 3x.
    assert!(elapsed >= delay * 2, "elapsed {elapsed:?}");
    assert!(elapsed < delay * 3 + Duration::from_millis(500), "elapsed {elapsed:?}");
}

#[tokio::test]
async fn chat_payload_shape_and_headers() {
    let client = client(0, vec![ok(answer("x"))]);
    let messages = vec![
        Message::system("You are a helpful AI assistant."),
        Message::user("hello"),
    ];

    client
        .chat_completion(&messages, &RequestOptions::new())
        .await
        .unwrap();

    let requests = client.transport.requests();
    let (url, api_key, body) = &requests[0];
    assert_eq!(url, "https://api.example.com/v1/chat/completions");
    assert_eq!(api_key, "sk-test");
    assert_eq!(
        body,
        &json!({
            "model": "test-model",
            "messages": [
                {"role": "system", "content": "You are a helpful AI assistant."},
                {"role": "user", "content": "hello"}
            ],
            "temperature": 0.7,
            "max_tokens": 2000,
            "stream": false
        })
    );
}

#[tokio::test]
async fn completion_payload_uses_prompt_and_path() {
    let client = client(0, vec![ok(json!({"choices": [{"text": "world"}]}))]);

    client
        .completion("hello", &RequestOptions::new().with_max_tokens(16))
        .await
        .unwrap();

    let requests = client.transport.requests();
    let (url, _, body) = &requests[0];
    assert_eq!(url, "https://api.example.com/v1/completions");
    assert_eq!(body["prompt"], "hello");
    assert_eq!(body["max_tokens"], 16);
    assert!(body.get("messages").is_none());
}

#[tokio::test]
async fn explicit_zero_temperature_is_sent() {
    let client = client(0, vec![ok(answer("x"))]);

    client
        .chat_completion(
            &[Message::user("hi")],
            &RequestOptions::new().with_temperature(0.0),
        )
        .await
        .unwrap();

    assert_eq!(client.transport.requests()[0].2["temperature"], 0.0);
}

#[tokio::test]
async fn extra_fields_are_merged_and_override() {
    let client = client(0, vec![ok(answer("x"))]);
    let options = RequestOptions::new()
        .with_stream(true)
        .with_extra("top_p", json!(0.5))
        .with_extra("model", json!("override-model"));

    client
        .chat_completion(&[Message::user("hi")], &options)
        .await
        .unwrap();

    let body = &client.transport.requests()[0].2;
    assert_eq!(body["top_p"], 0.5);
    assert_eq!(body["model"], "override-model");
    assert_eq!(body["stream"], true);
}

#[tokio::test]
async fn every_attempt_resends_the_same_payload() {
    let client = client(2, vec![network("a"), network("b"), ok(answer("c"))]);

    client
        .chat_completion(&[Message::user("hi")], &RequestOptions::new())
        .await
        .unwrap();

    let requests = client.transport.requests();
    assert_eq!(requests.len(), 3);
    assert!(requests.iter().all(|r| r == &requests[0]));
}

#[tokio::test]
async fn every_attempt_gets_the_full_timeout() {
    let timeout = Duration::from_secs(45);
    let config = config(2).with_timeout(timeout);
    let transport = ScriptedTransport::new(vec![
        status(503, ""),
        network("timed out"),
        ok(answer("x")),
    ]);
    let client = OpenAiClient::with_transport(config, transport).unwrap();

    client
        .completion("hi", &RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(client.transport.timeouts(), vec![timeout; 3]);
}

#[test]
fn error_message_extraction() {
    assert_eq!(
        extract_error_message(r#"{"error": {"message": "quota exceeded", "type": "billing"}}"#),
        "quota exceeded"
    );
    assert_eq!(extract_error_message(r#"{"error": "flat string"}"#), "Unknown error");
    assert_eq!(extract_error_message("Bad Gateway"), "Unknown error");
    assert_eq!(extract_error_message(""), "Unknown error");
}

#[test]
fn construction_rejects_unusable_config() {
    let transport = || ScriptedTransport::new(Vec::new());

    let err = OpenAiClient::with_transport(ClientConfig::new("", "sk", "m"), transport())
        .err()
        .unwrap();
    assert!(matches!(err, AiError::Config(_)));

    let err = OpenAiClient::with_transport(ClientConfig::new("http://x", "sk", " "), transport())
        .err()
        .unwrap();
    assert!(matches!(err, AiError::Config(_)));

    let err = OpenAiClient::with_transport(
        ClientConfig::new("http://x", "sk\nInjected: 1", "m"),
        transport(),
    )
    .err()
    .unwrap();
    assert!(matches!(err, AiError::Config(_)));
}

#[test]
fn endpoint_trims_trailing_slash() {
    let config = ClientConfig::new("http://localhost:8080/v1/", "sk", "m");
    assert_eq!(
        config.endpoint("/chat/completions"),
        "http://localhost:8080/v1/chat/completions"
    );
    let config = ClientConfig::new("http://localhost:8080/v1", "sk", "m");
    assert_eq!(config.endpoint("/completions"), "http://localhost:8080/v1/completions");
}

#[test]
fn config_debug_redacts_key() {
    let debug = format!("{:?}", config(3));
    assert!(!debug.contains("sk-test"));
    assert!(debug.contains("[REDACTED]"));
}
