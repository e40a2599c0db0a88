//! Test fixtures and data factories
//!
//! Factory methods for configs and requests with sensible defaults.

use llm_relay::config::{EndpointConfig, GatewayConfig};
use llm_relay::{CompletionRequest, Config, LoadBalancingStrategy, Priority, ProviderKind};

/// Factory for endpoint configs
pub struct EndpointFactory;

impl EndpointFactory {
    /// OpenAI endpoint with a single key
    pub fn openai(id: &str) -> EndpointConfig {
        Self::of(id, ProviderKind::OpenAI)
    }

    pub fn of(id: &str, provider: ProviderKind) -> EndpointConfig {
        EndpointConfig::new(id, provider, format!("https://{}.example.com", id))
            .with_api_key(format!("sk-{}", id))
    }
}

/// Factory for gateway configs tuned for fast tests
pub struct ConfigFactory;

impl ConfigFactory {
    /// Short backoff, rate limiting off, cache on
    pub fn with_endpoints(endpoints: Vec<EndpointConfig>) -> Config {
        let mut gateway = GatewayConfig {
            endpoints,
            ..Default::default()
        };
        gateway.failover.base_delay_ms = 10;
        gateway.failover.max_delay_ms = 100;
        gateway.rate_limit.enabled = false;
        Config { gateway }
    }

    pub fn with_strategy(endpoints: Vec<EndpointConfig>, strategy: LoadBalancingStrategy) -> Config {
        let mut config = Self::with_endpoints(endpoints);
        config.gateway.load_balancer.strategy = strategy;
        config
    }

    /// Same as [`ConfigFactory::with_endpoints`] with caching disabled
    pub fn uncached(endpoints: Vec<EndpointConfig>) -> Config {
        let mut config = Self::with_endpoints(endpoints);
        config.gateway.cache.enabled = false;
        config
    }
}

/// Factory for completion requests
pub struct RequestFactory;

impl RequestFactory {
    pub fn simple(prompt: &str) -> CompletionRequest {
        CompletionRequest::new(prompt)
    }

    pub fn with_priority(prompt: &str, priority: Priority) -> CompletionRequest {
        CompletionRequest::new(prompt).with_priority(priority)
    }

    /// `count` requests with distinct prompts
    pub fn batch(count: usize) -> Vec<CompletionRequest> {
        (0..count)
            .map(|i| CompletionRequest::new(format!("request {}", i)))
            .collect()
    }
}
