//! HTTP transport seam for completion requests.
//!
//! `OpenAiClient` issues every attempt through a `Transport`, which makes
//! the retry loop testable against a scripted transport. `HttpTransport`
//! is the production implementation over `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::AiError;

/// Status and raw body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// An attempt that produced no HTTP response.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    /// Connection, timeout, or other request-level failure.
    #[error("{0}")]
    Network(String),
    /// Anything else (request construction, unexpected state).
    #[error("{0}")]
    Other(String),
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` as JSON to `url` with a bearer credential.
    ///
    /// `timeout` bounds this single attempt.
    async fn post_json(
        &self,
        url: &str,
        api_key: &str,
        body: &serde_json::Value,
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError>;
}

/// `reqwest`-backed transport. Connections may be pooled between attempts.
///
/// The only time limit is the per-attempt `timeout` passed to `post_json`,
/// which covers connecting as well as reading the response.
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AiError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http })
    }
}

fn classify(e: reqwest::Error) -> TransportError {
    if e.is_builder() {
        TransportError::Other(e.to_string())
    } else {
        TransportError::Network(e.to_string())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(
        &self,
        url: &str,
        api_key: &str,
        body: &serde_json::Value,
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError> {
        debug!(%url, "POST");

        let response = self
            .http
            .post(url)
            .bearer_auth(api_key)
            .json(body)
            .timeout(timeout)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify)?;
        Ok(TransportResponse { status, body })
    }
}
