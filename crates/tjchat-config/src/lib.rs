//! tjchat configuration system.
//!
//! Provides TOML-based configuration with one section per completion
//! provider, plus chat and logging settings. All sections use sensible
//! defaults so partial configs work, but the selected provider section
//! must exist and carry an endpoint, key, and model.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tjchat_config::load_config;
//!
//! let config = load_config(None, None).expect("failed to load config");
//! let provider = config.active_provider().expect("validated above");
//! println!("{}", provider.model);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

// Re-export core types for convenience
pub use schema::{ChatConfig, LogLevel, LoggingConfig, ProviderConfig, TjchatConfig};

use std::path::Path;

use tjchat_common::ConfigError;

/// Load and validate the config.
///
/// `path` overrides the default lookup (`./config.toml`, then the platform
/// config dir). `provider` overrides `[api] provider`.
pub fn load_config(
    path: Option<&Path>,
    provider: Option<&str>,
) -> Result<TjchatConfig, ConfigError> {
    let mut config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };

    if let Some(name) = provider {
        config.api.provider = name.to_string();
    }

    validation::validate(&config)?;
    Ok(config)
}
