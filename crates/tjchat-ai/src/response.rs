//! Helpers for reading text out of completion response bodies.

use serde_json::Value;

use crate::AiError;

/// `choices[0].message.content` of a chat completion response.
pub fn chat_content(response: &Value) -> Result<String, AiError> {
    response["choices"][0]["message"]["content"]
        .as_str()
        .map(String::from)
        .ok_or_else(|| {
            AiError::ParseError("response has no choices[0].message.content".into())
        })
}

/// `choices[0].text` of a text completion response.
pub fn completion_text(response: &Value) -> Result<String, AiError> {
    response["choices"][0]["text"]
        .as_str()
        .map(String::from)
        .ok_or_else(|| AiError::ParseError("response has no choices[0].text".into()))
}
