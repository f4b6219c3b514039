//! One request/response exchange against a CompletionClient.

use tracing::{error, info};

use crate::response::chat_content;
use crate::{AiError, CompletionClient, Message};

use super::manager::ChatSession;

impl ChatSession {
    /// Send the committed turns plus a new user turn and return the reply.
    ///
    /// The user turn and the assistant turn are committed together, and only
    /// once the reply has been read; a failed exchange leaves the session as
    /// it was.
    pub async fn chat(
        &mut self,
        client: &dyn CompletionClient,
        user_message: impl Into<String>,
    ) -> Result<String, AiError> {
        let user = Message::user(user_message);

        let mut messages = self.messages.clone();
        messages.push(user.clone());

        let result = client
            .chat_completion(&messages, &self.request_options())
            .await
            .and_then(|response| chat_content(&response));

        match result {
            Ok(content) => {
                info!(user = %user.content, assistant = %content, "exchange completed");
                self.messages.push(user);
                self.messages.push(Message::assistant(content.clone()));
                Ok(content)
            }
            Err(e) => {
                error!("exchange failed: {e}");
                Err(e)
            }
        }
    }
}
