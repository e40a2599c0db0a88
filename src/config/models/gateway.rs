//! Top-level gateway configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Complete gateway configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GatewayConfig {
    #[serde(default)]
    pub endpoints: Vec<EndpointConfig>,
    #[serde(default)]
    pub load_balancer: LoadBalancerConfig,
    #[serde(default)]
    pub failover: FailoverConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}
