//! Configuration schema types for tjchat.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Provider sections have no usable defaults for the endpoint, key, or
//! model; validation reports those when they are left empty.

mod api;
mod chat;
mod logging;

pub use api::*;
pub use chat::*;
pub use logging::*;

use serde::{Deserialize, Serialize};
use tjchat_common::ConfigError;

/// Root configuration for tjchat.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct TjchatConfig {
    pub api: ApiConfig,
    pub chat: ChatConfig,
    pub logging: LoggingConfig,
}

impl TjchatConfig {
    /// Look up the `[api.<name>]` section.
    pub fn provider(&self, name: &str) -> Result<&ProviderConfig, ConfigError> {
        self.api
            .providers
            .get(name)
            .ok_or_else(|| ConfigError::MissingSection(format!("api.{name}")))
    }

    /// The section named by `[api] provider`.
    pub fn active_provider(&self) -> Result<&ProviderConfig, ConfigError> {
        self.provider(&self.api.provider)
    }
}

// =============================================================================
// Tests
// =============================================================================
