//! Completion provider configuration types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the provider section used when `[api] provider` is not set.
pub const DEFAULT_PROVIDER: &str = "openai";

/// One `[api.<name>]` section: endpoint, credential, and request defaults.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    /// Per-attempt timeout in seconds (valid range: 1-600).
    pub timeout: u64,
    /// Retries after the first attempt (valid range: 0-10).
    pub retry_count: u32,
    /// Constant delay between attempts in seconds (valid range: 0.0-60.0).
    pub retry_delay: f64,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("retry_count", &self.retry_count)
            .field("retry_delay", &self.retry_delay)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            model: String::new(),
            timeout: 30,
            retry_count: 3,
            retry_delay: 1.0,
            temperature: 0.7,
            max_tokens: 2000,
        }
    }
}

/// The `[api]` table: selected provider plus every `[api.<name>]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub provider: String,
    #[serde(flatten)]
    pub providers: BTreeMap<String, ProviderConfig>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            provider: DEFAULT_PROVIDER.into(),
            providers: BTreeMap::new(),
        }
    }
}
