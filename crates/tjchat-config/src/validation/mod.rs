//! Full configuration validation.
//!
//! Checks the selected provider section and the logging section, and
//! collects every problem into a single `ConfigError`.

mod helpers;
mod logging;
mod provider;


use crate::schema::TjchatConfig;
use tjchat_common::ConfigError;

/// Validate the config for use with the provider named by `[api] provider`.
pub fn validate(config: &TjchatConfig) -> Result<(), ConfigError> {
    validate_for(config, &config.api.provider)
}

/// Validate the config for use with a specific provider section.
///
/// A missing section is reported as `ConfigError::MissingSection` rather than
/// folded into the collected validation errors.
pub fn validate_for(config: &TjchatConfig, provider: &str) -> Result<(), ConfigError> {
    let section = config.provider(provider)?;

    let mut errors: Vec<String> = Vec::new();
    provider::validate_provider(&mut errors, provider, section);
    logging::validate_logging(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
