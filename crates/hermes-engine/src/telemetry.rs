//! Logging initialization.
//!
//! Installs the global `tracing` subscriber from the logging section of
//! the application configuration. Call once at startup, after the
//! configuration has loaded.

use hermes_config::{LogFormat, LoggingConfig};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Failure to install the logging subscriber.
#[derive(Debug, Error)]
#[error("failed to initialize logging: {reason}")]
pub struct TelemetryError {
    reason: String,
}

/// Initializes structured logging per the configuration.
///
/// The configured level acts as the default filter; the `RUST_LOG`
/// environment variable still takes precedence per `EnvFilter` rules.
///
/// # Errors
///
/// Returns [`TelemetryError`] when the filter is malformed or a global
/// subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_new(&config.level).map_err(|error| TelemetryError {
        reason: error.to_string(),
    })?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = match config.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
    result.map_err(|error| TelemetryError {
        reason: error.to_string(),
    })
}
