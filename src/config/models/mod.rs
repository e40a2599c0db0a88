//! Configuration data models
//!
//! This module defines all configuration structures used throughout the gateway.

#![allow(missing_docs)]

pub mod cache;
pub mod endpoint;
pub mod failover;
pub mod gateway;
pub mod load_balancer;
pub mod logging;
pub mod rate_limit;

// Re-export all configuration types
pub use cache::*;
pub use endpoint::*;
pub use failover::*;
pub use gateway::*;
pub use load_balancer::*;
pub use logging::*;
pub use rate_limit::*;

pub fn default_true() -> bool {
    true
}

/// Default per-attempt transport timeout in milliseconds
pub fn default_timeout_ms() -> u64 {
    30_000
}

/// Default per-endpoint concurrency bound
pub fn default_max_concurrency() -> usize {
    10
}

/// Default endpoint base weight
pub fn default_weight() -> f64 {
    1.0
}

pub fn default_health_check_interval_ms() -> u64 {
    30_000
}

pub fn default_max_retry_attempts() -> u32 {
    3
}

pub fn default_base_delay_ms() -> u64 {
    200
}

pub fn default_max_delay_ms() -> u64 {
    10_000
}

pub fn default_backoff_multiplier() -> f64 {
    2.0
}

pub fn default_retryable_status_codes() -> Vec<u16> {
    vec![408, 429, 500, 502, 503, 504]
}

pub fn default_cache_max_entries() -> usize {
    10_000
}

pub fn default_max_requests() -> u32 {
    60
}

pub fn default_window_ms() -> u64 {
    60_000
}

pub fn default_log_level() -> String {
    "info".to_string()
}
