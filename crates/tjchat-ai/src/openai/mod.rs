//! OpenAI-compatible completion client.
//!
//! Implements `CompletionClient` for any endpoint that speaks the OpenAI
//! `/chat/completions` and `/completions` request shapes with a bearer
//! credential.

mod api;
mod client;
mod config;

#[cfg(test)]
mod tests;

pub use client::OpenAiClient;
pub use config::ClientConfig;
