//! Where config files live, and writing the first-run template.

use std::path::{Path, PathBuf};
use tjchat_common::ConfigError;
use tracing::info;

use super::template::default_config_toml;

/// `config.toml` in the current working directory.
pub fn local_config_path() -> PathBuf {
    PathBuf::from("config.toml")
}

/// `<platform config dir>/tjchat/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join("tjchat").join("config.toml"))
}

/// Write the commented template to `path`, creating parent directories.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error(parent))?;
    }
    std::fs::write(path, default_config_toml()).map_err(write_error(path))?;

    info!(path = %path.display(), "wrote config template");
    Ok(())
}

fn write_error(target: &Path) -> impl FnOnce(std::io::Error) -> ConfigError {
    let path = target.to_path_buf();
    move |source| ConfigError::Write { path, source }
}
