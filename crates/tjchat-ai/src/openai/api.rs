//! CompletionClient trait implementation for OpenAiClient.

use async_trait::async_trait;
use tracing::debug;

use crate::transport::Transport;
use crate::{AiError, CompletionClient, Message, RequestOptions};

use super::client::{OpenAiClient, CHAT_COMPLETIONS_PATH, COMPLETIONS_PATH};

#[async_trait]
impl<T: Transport> CompletionClient for OpenAiClient<T> {
    async fn chat_completion(
        &self,
        messages: &[Message],
        options: &RequestOptions,
    ) -> Result<serde_json::Value, AiError> {
        let body = self.build_chat_body(messages, options)?;
        let url = self.config.endpoint(CHAT_COMPLETIONS_PATH);

        debug!(model = %self.config.model, messages = messages.len(), "chat completion request");

        self.send_with_retry(&url, &body).await
    }

    async fn completion(
        &self,
        prompt: &str,
        options: &RequestOptions,
    ) -> Result<serde_json::Value, AiError> {
        let body = self.build_completion_body(prompt, options);
        let url = self.config.endpoint(COMPLETIONS_PATH);

        debug!(model = %self.config.model, "text completion request");

        self.send_with_retry(&url, &body).await
    }
}
