//! Tracing subscriber setup: console output plus an optional rolling log file.

use std::path::Path;

use tjchat_common::TjchatError;
use tjchat_config::{LogLevel, LoggingConfig};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{Builder, RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `level_override`, which wins over the configured
/// level. When a log file is configured the console only shows warnings and
/// errors, so exchange records do not interleave with the chat transcript.
/// The returned guard must be held until shutdown to flush the file writer.
pub(crate) fn init_logging(
    config: &LoggingConfig,
    level_override: Option<LogLevel>,
) -> Result<Option<WorkerGuard>, TjchatError> {
    let level = effective_level(config, level_override);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_directive()));

    let (file_layer, guard) = match file_appender(config)? {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let console_level = if guard.is_some() {
        LevelFilter::WARN
    } else {
        LevelFilter::TRACE
    };
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(console_level);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| TjchatError::Other(format!("failed to install logger: {e}")))?;

    Ok(guard)
}

fn effective_level(config: &LoggingConfig, level_override: Option<LogLevel>) -> LogLevel {
    level_override.unwrap_or(config.level)
}

/// Daily-rolling appender for `config.file`, keeping `backup_count` files.
/// Returns `None` when file logging is disabled.
fn file_appender(config: &LoggingConfig) -> Result<Option<RollingFileAppender>, TjchatError> {
    let file = config.file.trim();
    if file.is_empty() {
        return Ok(None);
    }

    let path = Path::new(file);
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let prefix = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| TjchatError::Other(format!("invalid log file path: {file}")))?;

    let mut builder = Builder::new()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix);
    if config.backup_count > 0 {
        builder = builder.max_log_files(config.backup_count as usize);
    }

    builder
        .build(dir)
        .map(Some)
        .map_err(|e| TjchatError::Other(format!("failed to open log file {file}: {e}")))
}
