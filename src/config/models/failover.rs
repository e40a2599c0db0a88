//! Failover configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry, backoff and fallback settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FailoverConfig {
    /// Retries after the first attempt (total attempts = this + 1)
    #[serde(default = "default_max_retry_attempts")]
    pub max_retry_attempts: u32,
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    #[serde(default = "default_backoff_multiplier")]
    pub multiplier: f64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    #[serde(default = "default_true")]
    pub enable_local_fallback: bool,
    /// HTTP statuses that make an API error retryable
    #[serde(default = "default_retryable_status_codes")]
    pub retryable_status_codes: Vec<u16>,
    /// Extra error kinds (see `ProviderError::kind`) treated as retryable
    #[serde(default, alias = "retryable_exception_types")]
    pub retryable_error_kinds: Vec<String>,
}

impl Default for FailoverConfig {
    fn default() -> Self {
        Self {
            max_retry_attempts: default_max_retry_attempts(),
            base_delay_ms: default_base_delay_ms(),
            multiplier: default_backoff_multiplier(),
            max_delay_ms: default_max_delay_ms(),
            enable_local_fallback: true,
            retryable_status_codes: default_retryable_status_codes(),
            retryable_error_kinds: Vec::new(),
        }
    }
}

impl FailoverConfig {
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }

    /// First try plus retries
    pub fn max_attempts(&self) -> u32 {
        self.max_retry_attempts.saturating_add(1)
    }
}
