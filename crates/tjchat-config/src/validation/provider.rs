//! Validation for `[api.<name>]` provider sections.

use crate::schema::ProviderConfig;

use super::helpers::{validate_non_empty, validate_range, validate_range_f64};

/// Validate one provider section. `name` is the section key, used in messages.
pub(crate) fn validate_provider(errors: &mut Vec<String>, name: &str, provider: &ProviderConfig) {
    let key = |field: &str| format!("api.{name}.{field}");

    validate_non_empty(errors, &key("base_url"), &provider.base_url);
    if !provider.base_url.trim().is_empty()
        && !provider.base_url.starts_with("http://")
        && !provider.base_url.starts_with("https://")
    {
        errors.push(format!(
            "{} = {:?} must start with http:// or https://",
            key("base_url"),
            provider.base_url
        ));
    }
    validate_non_empty(errors, &key("api_key"), &provider.api_key);
    validate_non_empty(errors, &key("model"), &provider.model);

    validate_range(errors, &key("timeout"), provider.timeout, 1, 600);
    validate_range(
        errors,
        &key("retry_count"),
        u64::from(provider.retry_count),
        0,
        10,
    );
    validate_range_f64(errors, &key("retry_delay"), provider.retry_delay, 0.0, 60.0);
    validate_range_f64(errors, &key("temperature"), provider.temperature, 0.0, 1.0);
    validate_range(
        errors,
        &key("max_tokens"),
        u64::from(provider.max_tokens),
        1,
        128_000,
    );
}
