//! Chat completion core for tjchat.
//!
//! Provides:
//! - `ChatSession`: the ordered log of conversation turns plus
//!   generation parameters
//! - `CompletionClient`: the capability for issuing chat and raw-prompt
//!   completions, with `OpenAiClient` as the implementation for
//!   OpenAI-compatible endpoints
//! - Bounded constant-delay retry over a pluggable HTTP `Transport`

pub mod openai;
pub mod response;
pub mod session;
pub mod transport;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use openai::{ClientConfig, OpenAiClient};
pub use response::{chat_content, completion_text};
pub use session::ChatSession;
pub use transport::{HttpTransport, Transport, TransportError, TransportResponse};

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// POST the turns to the chat completions endpoint and return the parsed body.
    async fn chat_completion(
        &self,
        messages: &[Message],
        options: &RequestOptions,
    ) -> Result<serde_json::Value, AiError>;

    /// POST a single prompt to the text completions endpoint.
    async fn completion(
        &self,
        prompt: &str,
        options: &RequestOptions,
    ) -> Result<serde_json::Value, AiError>;
}

/// One turn in a conversation.
///
/// `name` and `function_call` are omitted from the serialized form when
/// absent; they are never emitted as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            name: None,
            function_call: None,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Function,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Function => "function",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A function invocation attached to a turn. `arguments` is the
/// JSON-encoded argument object, as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
}

/// Per-call generation parameters.
///
/// `None` falls back to the client's configured default. `extra` is merged
/// into the payload last, so its keys override the base fields.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
    /// Sent as-is in the payload. The response is always read as a single
    /// JSON body; incremental delivery is not implemented.
    pub stream: bool,
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_stream(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("API request failed: {0}")]
    ApiError(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Unexpected error: {0}")]
    Unexpected(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Configuration error: {0}")]
    Config(String),
}
