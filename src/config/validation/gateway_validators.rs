//! Gateway configuration validators

use super::trait_def::Validate;
use crate::config::models::*;
use std::collections::HashSet;
use tracing::debug;

impl Validate for GatewayConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating gateway configuration");

        let mut seen = HashSet::new();
        for endpoint in &self.endpoints {
            endpoint.validate()?;
            if !seen.insert(endpoint.id.as_str()) {
                return Err(format!("Duplicate endpoint id: {}", endpoint.id));
            }
        }

        self.load_balancer.validate()?;
        self.failover.validate()?;
        self.cache.validate()?;
        self.rate_limit.validate()?;

        Ok(())
    }
}

impl Validate for EndpointConfig {
    fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("Endpoint id cannot be empty".to_string());
        }

        if self.base_address.trim().is_empty() {
            return Err(format!("Endpoint {} has an empty base address", self.id));
        }

        if self.max_concurrency == 0 {
            return Err(format!(
                "Endpoint {} max concurrency must be greater than 0",
                self.id
            ));
        }

        if self.timeout_ms == 0 {
            return Err(format!("Endpoint {} timeout must be greater than 0", self.id));
        }

        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(format!(
                "Endpoint {} weight must be a non-negative number",
                self.id
            ));
        }

        if let Some(cost) = self.cost_per_1k_tokens {
            if !cost.is_finite() || cost < 0.0 {
                return Err(format!("Endpoint {} cost must be non-negative", self.id));
            }
        }

        Ok(())
    }
}

impl Validate for LoadBalancerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.health_check_interval_ms == 0 {
            return Err("Health check interval must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for FailoverConfig {
    fn validate(&self) -> Result<(), String> {
        if self.multiplier < 1.0 || !self.multiplier.is_finite() {
            return Err("Retry backoff multiplier must be at least 1.0".to_string());
        }

        if self.max_delay_ms < self.base_delay_ms {
            return Err("Retry max delay must not be smaller than base delay".to_string());
        }

        Ok(())
    }
}

impl Validate for CacheConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled && self.max_entries == 0 {
            return Err("Cache max entries must be greater than 0".to_string());
        }

        if let Some((priority, _)) = self.expiration_by_priority.iter().find(|(_, ttl)| **ttl == 0)
        {
            return Err(format!("Cache TTL for {:?} must be greater than 0", priority));
        }

        Ok(())
    }
}

impl Validate for RateLimitConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled {
            if self.max_requests == 0 {
                return Err("Rate limit max requests must be greater than 0".to_string());
            }

            if self.window_ms == 0 {
                return Err("Rate limit window must be greater than 0".to_string());
            }
        }

        Ok(())
    }
}
