//! Tracing subscriber setup.

use crate::config::LoggingSettings;
use kurator_error::{ConfigError, KuratorResult};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the log filter: `--verbose` forces debug, then `RUST_LOG`, then the
/// configured level.
pub fn env_filter(settings: &LoggingSettings, verbose: bool) -> KuratorResult<EnvFilter> {
    if verbose {
        return Ok(EnvFilter::new("debug"));
    }
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(settings.level()))
        .map_err(|e| ConfigError::new(format!("Invalid log level: {e}")).into())
}

/// Install the global subscriber.
pub fn init_tracing(settings: &LoggingSettings, verbose: bool) -> KuratorResult<()> {
    let filter = env_filter(settings, verbose)?;

    let fmt_layer = if *settings.json() {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_level(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_level(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| ConfigError::new(format!("Failed to install tracing subscriber: {e}")).into())
}
