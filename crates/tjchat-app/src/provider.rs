//! Bridge from a validated `[api.<name>]` section to the client's config.

use std::time::Duration;

use tjchat_ai::ClientConfig;
use tjchat_config::ProviderConfig;

pub(crate) fn client_config(provider: &ProviderConfig) -> ClientConfig {
    ClientConfig::new(&provider.base_url, &provider.api_key, &provider.model)
        .with_timeout(Duration::from_secs(provider.timeout))
        .with_retry_count(provider.retry_count)
        .with_retry_delay(Duration::from_secs_f64(provider.retry_delay.max(0.0)))
        .with_temperature(provider.temperature)
        .with_max_tokens(provider.max_tokens)
}
