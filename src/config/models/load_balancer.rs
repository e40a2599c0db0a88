//! Load balancer configuration

use super::*;
use crate::core::router::strategy::LoadBalancingStrategy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Load balancer configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoadBalancerConfig {
    /// Selection strategy
    #[serde(default)]
    pub strategy: LoadBalancingStrategy,
    /// Interval of the background health sweep
    #[serde(default = "default_health_check_interval_ms")]
    pub health_check_interval_ms: u64,
}

impl Default for LoadBalancerConfig {
    fn default() -> Self {
        Self {
            strategy: LoadBalancingStrategy::default(),
            health_check_interval_ms: default_health_check_interval_ms(),
        }
    }
}

impl LoadBalancerConfig {
    pub fn health_check_interval(&self) -> Duration {
        Duration::from_millis(self.health_check_interval_ms)
    }
}
