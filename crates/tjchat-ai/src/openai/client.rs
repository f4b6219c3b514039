//! Client struct, request payload building, and the retry loop.

use reqwest::header::HeaderValue;
use serde_json::{Map, Value};
use tracing::warn;

use crate::transport::{HttpTransport, Transport, TransportError};
use crate::{AiError, Message, RequestOptions};

use super::config::ClientConfig;

pub(crate) const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";
pub(crate) const COMPLETIONS_PATH: &str = "/completions";

const UNKNOWN_ERROR: &str = "Unknown error";

/// Completion client for OpenAI-compatible endpoints.
pub struct OpenAiClient<T = HttpTransport> {
    pub(crate) config: ClientConfig,
    pub(crate) transport: T,
}

impl OpenAiClient<HttpTransport> {
    pub fn new(config: ClientConfig) -> Result<Self, AiError> {
        Self::with_transport(config, HttpTransport::new()?)
    }
}

impl<T: Transport> OpenAiClient<T> {
    /// Build a client over a caller-supplied transport.
    ///
    /// Rejects configs that could never produce a valid request.
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self, AiError> {
        if config.base_url.trim().is_empty() {
            return Err(AiError::Config("base_url is empty".into()));
        }
        if config.model.trim().is_empty() {
            return Err(AiError::Config("model is empty".into()));
        }
        HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| AiError::Config("api_key is not a valid header value".into()))?;

        Ok(Self { config, transport })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fields shared by both endpoints, with `extra` merged last.
    fn build_body(&self, mut body: Map<String, Value>, options: &RequestOptions) -> Value {
        body.insert("model".into(), Value::from(self.config.model.as_str()));
        body.insert(
            "temperature".into(),
            Value::from(options.temperature.unwrap_or(self.config.temperature)),
        );
        body.insert(
            "max_tokens".into(),
            Value::from(options.max_tokens.unwrap_or(self.config.max_tokens)),
        );
        body.insert("stream".into(), Value::Bool(options.stream));
        for (key, value) in &options.extra {
            body.insert(key.clone(), value.clone());
        }
        Value::Object(body)
    }

    /// Build the JSON request body for the chat completions endpoint.
    pub(crate) fn build_chat_body(
        &self,
        messages: &[Message],
        options: &RequestOptions,
    ) -> Result<Value, AiError> {
        let messages = serde_json::to_value(messages)
            .map_err(|e| AiError::Unexpected(format!("failed to serialize messages: {e}")))?;
        let mut body = Map::new();
        body.insert("messages".into(), messages);
        Ok(self.build_body(body, options))
    }

    /// Build the JSON request body for the text completions endpoint.
    pub(crate) fn build_completion_body(&self, prompt: &str, options: &RequestOptions) -> Value {
        let mut body = Map::new();
        body.insert("prompt".into(), Value::from(prompt));
        self.build_body(body, options)
    }

    /// POST `body` to `url`, retrying failed attempts with a constant delay.
    ///
    /// Makes at most `retry_count + 1` attempts. The error of the last
    /// attempt is returned once the budget is spent.
    pub(crate) async fn send_with_retry(&self, url: &str, body: &Value) -> Result<Value, AiError> {
        let mut attempts_left = self.config.retry_count;
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            let error = match self.attempt(url, body).await {
                Ok(json) => return Ok(json),
                Err(e) => e,
            };

            if attempts_left == 0 {
                return Err(error);
            }

            warn!(%url, attempt, attempts_left, "request failed, retrying: {error}");
            attempts_left -= 1;
            tokio::time::sleep(self.config.retry_delay).await;
        }
    }

    async fn attempt(&self, url: &str, body: &Value) -> Result<Value, AiError> {
        let response = self
            .transport
            .post_json(url, &self.config.api_key, body, self.config.timeout)
            .await
            .map_err(|e| match e {
                TransportError::Network(detail) => AiError::NetworkError(detail),
                TransportError::Other(detail) => AiError::Unexpected(detail),
            })?;

        if !response.is_success() {
            return Err(AiError::ApiError(extract_error_message(&response.body)));
        }

        serde_json::from_str(&response.body)
            .map_err(|e| AiError::Unexpected(format!("invalid JSON in response body: {e}")))
    }
}

/// Pull `error.message` out of an error body, or fall back to a generic text.
pub(crate) fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| json["error"]["message"].as_str().map(String::from))
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
}
