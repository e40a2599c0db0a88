//! Gateway builder
//!
//! Transports are resolved per endpoint: an id-specific transport wins over
//! one registered for the endpoint's provider kind.

use super::Gateway;
use crate::config::Config;
use crate::core::cache_manager::{CacheStore, ResponseCache};
use crate::core::endpoint::EndpointClient;
use crate::core::failover::{FailoverEngine, LocalFallback};
use crate::core::providers::ProviderTransport;
use crate::core::rate_limiter::RateLimiter;
use crate::core::router::LoadBalancer;
use crate::core::types::ProviderKind;
use crate::core::usage::UsageTracker;
use crate::services::CostTable;
use crate::utils::error::{GatewayError, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Builder for [`Gateway`]
#[derive(Default)]
pub struct GatewayBuilder {
    config: Option<Config>,
    endpoint_transports: HashMap<String, Arc<dyn ProviderTransport>>,
    provider_transports: HashMap<ProviderKind, Arc<dyn ProviderTransport>>,
    fallback: Option<LocalFallback>,
    costs: CostTable,
    cache_store: Option<Arc<dyn CacheStore>>,
}

impl GatewayBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Transport for one endpoint id
    pub fn with_transport(
        mut self,
        endpoint_id: impl Into<String>,
        transport: Arc<dyn ProviderTransport>,
    ) -> Self {
        self.endpoint_transports.insert(endpoint_id.into(), transport);
        self
    }

    /// Transport for every endpoint of `provider` without its own transport
    pub fn with_provider_transport(
        mut self,
        provider: ProviderKind,
        transport: Arc<dyn ProviderTransport>,
    ) -> Self {
        self.provider_transports.insert(provider, transport);
        self
    }

    /// Fallback used by calls that do not bring their own
    pub fn with_fallback(mut self, fallback: LocalFallback) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn with_costs(mut self, costs: CostTable) -> Self {
        self.costs = costs;
        self
    }

    /// Replace the in-memory response store
    pub fn with_cache_store(mut self, store: Arc<dyn CacheStore>) -> Self {
        self.cache_store = Some(store);
        self
    }

    /// Validate the configuration and wire up all components
    pub fn build(self) -> Result<Gateway> {
        let config = self
            .config
            .ok_or_else(|| GatewayError::Config("Configuration is required".to_string()))?;
        config.validate()?;
        let gateway = &config.gateway;

        let cache = Arc::new(match self.cache_store {
            Some(store) => ResponseCache::with_store(gateway.cache.clone(), store),
            None => ResponseCache::new(gateway.cache.clone()),
        });

        let mut clients = Vec::with_capacity(gateway.endpoints.len());
        for endpoint in &gateway.endpoints {
            let transport = self
                .endpoint_transports
                .get(&endpoint.id)
                .or_else(|| self.provider_transports.get(&endpoint.provider))
                .cloned()
                .ok_or_else(|| {
                    GatewayError::Config(format!(
                        "No transport registered for endpoint {} ({})",
                        endpoint.id, endpoint.provider
                    ))
                })?;

            debug!(endpoint = %endpoint.id, provider = %endpoint.provider, "Creating endpoint client");
            clients.push(Arc::new(
                EndpointClient::new(endpoint.clone(), transport).with_cache(Arc::clone(&cache)),
            ));
        }

        let balancer = Arc::new(LoadBalancer::with_costs(
            clients,
            gateway.load_balancer.strategy,
            self.costs,
        ));
        let usage = Arc::new(UsageTracker::new());
        let engine = Arc::new(FailoverEngine::new(
            &gateway.failover,
            Arc::clone(&balancer),
            Arc::clone(&usage),
        ));
        let limiter = Arc::new(RateLimiter::new(&gateway.rate_limit));

        info!(
            endpoints = gateway.endpoints.len(),
            strategy = %gateway.load_balancer.strategy,
            "Gateway initialized"
        );

        Ok(Gateway {
            config: Arc::new(config),
            balancer,
            engine,
            limiter,
            cache,
            usage,
            default_fallback: self.fallback,
        })
    }
}
