//! Rate limiting configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Sliding-window admission control configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Admissions allowed per window
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
    /// Window length in milliseconds
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_requests: default_max_requests(),
            window_ms: default_window_ms(),
        }
    }
}

impl RateLimitConfig {
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}
