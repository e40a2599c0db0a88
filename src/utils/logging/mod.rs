//! Logging setup
//!
//! The gateway itself only emits `tracing` events. Binaries and tests call
//! [`init_logging`] once to install a `fmt` subscriber.

use crate::config::models::LoggingConfig;
use crate::utils::error::{GatewayError, Result};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Build the event filter. `RUST_LOG` wins over the configured level.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    EnvFilter::try_new(&config.level)
        .map_err(|e| GatewayError::Config(format!("Invalid log level '{}': {}", config.level, e)))
}

/// Install the global subscriber.
///
/// Calling this again after a subscriber is already installed is not an error.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(config)?;

    let installed = if config.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(false)
            .try_init()
    };

    if installed.is_err() {
        debug!("Global subscriber already installed, keeping it");
    }

    Ok(())
}
