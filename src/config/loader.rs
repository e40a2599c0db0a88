//! Environment overrides
//!
//! Recognised variables (all optional):
//!
//! - `LLM_RELAY_STRATEGY` - load balancing strategy name
//! - `LLM_RELAY_MAX_RETRY_ATTEMPTS`
//! - `LLM_RELAY_RATE_LIMIT_MAX_REQUESTS`
//! - `LLM_RELAY_RATE_LIMIT_WINDOW_MS`
//! - `LLM_RELAY_CACHE_ENABLED`
//! - `LLM_RELAY_LOG_LEVEL`

use super::models::GatewayConfig;
use crate::utils::error::{GatewayError, Result};
use std::str::FromStr;
use tracing::debug;

pub const ENV_STRATEGY: &str = "LLM_RELAY_STRATEGY";
pub const ENV_MAX_RETRY_ATTEMPTS: &str = "LLM_RELAY_MAX_RETRY_ATTEMPTS";
pub const ENV_RATE_LIMIT_MAX_REQUESTS: &str = "LLM_RELAY_RATE_LIMIT_MAX_REQUESTS";
pub const ENV_RATE_LIMIT_WINDOW_MS: &str = "LLM_RELAY_RATE_LIMIT_WINDOW_MS";
pub const ENV_CACHE_ENABLED: &str = "LLM_RELAY_CACHE_ENABLED";
pub const ENV_LOG_LEVEL: &str = "LLM_RELAY_LOG_LEVEL";

impl GatewayConfig {
    /// Apply overrides from the process environment (and `.env` if present)
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        let _ = dotenvy::dotenv();
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable source
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_STRATEGY) {
            self.load_balancer.strategy = parse(ENV_STRATEGY, &value)?;
        }
        if let Some(value) = lookup(ENV_MAX_RETRY_ATTEMPTS) {
            self.failover.max_retry_attempts = parse(ENV_MAX_RETRY_ATTEMPTS, &value)?;
        }
        if let Some(value) = lookup(ENV_RATE_LIMIT_MAX_REQUESTS) {
            self.rate_limit.max_requests = parse(ENV_RATE_LIMIT_MAX_REQUESTS, &value)?;
        }
        if let Some(value) = lookup(ENV_RATE_LIMIT_WINDOW_MS) {
            self.rate_limit.window_ms = parse(ENV_RATE_LIMIT_WINDOW_MS, &value)?;
        }
        if let Some(value) = lookup(ENV_CACHE_ENABLED) {
            self.cache.enabled = parse(ENV_CACHE_ENABLED, &value)?;
        }
        if let Some(value) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = value;
        }

        debug!("Environment overrides applied");
        Ok(())
    }
}

fn parse<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| GatewayError::Config(format!("Invalid value for {}: {}", key, e)))
}
