//! ChatSession struct and turn-log management.

use tracing::debug;

use crate::{FunctionCall, Message, RequestOptions, Role};

const DEFAULT_TEMPERATURE: f64 = 0.7;
const DEFAULT_MAX_TOKENS: u32 = 2000;

/// An ordered, append-only (until cleared) log of turns plus generation
/// parameters.
#[derive(Debug, Clone)]
pub struct ChatSession {
    /// Conversation turns, oldest first.
    pub(super) messages: Vec<Message>,
    /// Sampling temperature, kept within [0.0, 1.0].
    pub(super) temperature: f64,
    /// Completion length cap, at least 1.
    pub(super) max_tokens: u32,
}

impl ChatSession {
    pub fn new(temperature: f64, max_tokens: u32) -> Self {
        Self {
            messages: Vec::new(),
            temperature: clamp_temperature(temperature, DEFAULT_TEMPERATURE),
            max_tokens: max_tokens.max(1),
        }
    }

    /// Append a turn. Empty `name`s and function calls with an empty name
    /// are dropped so they never reach the wire.
    pub fn add_message(
        &mut self,
        role: Role,
        content: impl Into<String>,
        name: Option<String>,
        function_call: Option<FunctionCall>,
    ) {
        self.push(Message {
            role,
            content: content.into(),
            name,
            function_call,
        });
    }

    /// Append a prebuilt turn, applying the same normalization as `add_message`.
    pub fn push(&mut self, mut message: Message) {
        message.name = message.name.filter(|n| !n.is_empty());
        message.function_call = message.function_call.filter(|f| !f.name.is_empty());
        self.messages.push(message);
    }

    /// The current turns, in the order they were added.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Drop every turn. Generation parameters are kept, and no system turn
    /// is re-added.
    pub fn clear(&mut self) {
        debug!(count = self.messages.len(), "clearing session");
        self.messages.clear();
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Set the temperature, clamped into [0.0, 1.0]. NaN is ignored.
    pub fn set_temperature(&mut self, temperature: f64) {
        self.temperature = clamp_temperature(temperature, self.temperature);
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    /// Set the completion length cap; zero is raised to 1.
    pub fn set_max_tokens(&mut self, max_tokens: u32) {
        self.max_tokens = max_tokens.max(1);
    }

    /// Request options carrying this session's generation parameters.
    pub fn request_options(&self) -> RequestOptions {
        RequestOptions::new()
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens)
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPERATURE, DEFAULT_MAX_TOKENS)
    }
}

fn clamp_temperature(value: f64, fallback: f64) -> f64 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(0.0, 1.0)
    }
}
