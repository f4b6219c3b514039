//! Core TOML config loading: read from path or the default locations.

use crate::schema::TjchatConfig;
use std::path::Path;
use tjchat_common::ConfigError;
use tracing::info;

use super::paths::{create_default_config, default_config_path, local_config_path};

/// Load config from a specific TOML file path.
///
/// Deserializes the file using serde defaults for any missing fields.
/// Validation is left to the caller, which knows the selected provider.
pub fn load_from_path(path: &Path) -> Result<TjchatConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: TjchatConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from `./config.toml`, falling back to the platform path.
///
/// On macOS: `~/Library/Application Support/tjchat/config.toml`
/// On Linux: `~/.config/tjchat/config.toml`
///
/// If neither file exists, a commented template is written to the platform
/// path and `FileNotFound` is returned so the user can fill in the key.
pub fn load_default() -> Result<TjchatConfig, ConfigError> {
    let local = local_config_path();
    if local.exists() {
        return load_from_path(&local);
    }

    let path = default_config_path()?;
    if path.exists() {
        return load_from_path(&path);
    }

    info!("no config found at {}, creating template", path.display());
    create_default_config(&path)?;
    Err(ConfigError::FileNotFound(path))
}
