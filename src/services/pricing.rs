//! Static per-provider pricing
//!
//! Prices are USD per 1K tokens (prompt and completion billed alike). An
//! endpoint's `cost_per_1k_tokens` overrides the provider default.

use crate::config::models::EndpointConfig;
use crate::core::types::ProviderKind;
use std::collections::HashMap;

/// Built-in prices, USD per 1K tokens
pub fn default_price_per_1k(provider: ProviderKind) -> f64 {
    match provider {
        ProviderKind::OpenAI => 0.002,
        ProviderKind::Anthropic => 0.003,
        ProviderKind::Azure => 0.002,
        ProviderKind::Gemini => 0.0005,
        ProviderKind::Groq => 0.0003,
        ProviderKind::Mistral => 0.001,
        ProviderKind::DeepSeek => 0.0002,
        ProviderKind::Local => 0.0,
    }
}

/// Price lookup used by cost-aware selection and usage accounting
#[derive(Debug, Clone)]
pub struct CostTable {
    prices: HashMap<ProviderKind, f64>,
}

impl Default for CostTable {
    fn default() -> Self {
        Self {
            prices: ProviderKind::ALL
                .iter()
                .map(|p| (*p, default_price_per_1k(*p)))
                .collect(),
        }
    }
}

impl CostTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the price for one provider
    pub fn with_price(mut self, provider: ProviderKind, price_per_1k: f64) -> Self {
        self.prices.insert(provider, price_per_1k);
        self
    }

    pub fn provider_price(&self, provider: ProviderKind) -> f64 {
        self.prices
            .get(&provider)
            .copied()
            .unwrap_or_else(|| default_price_per_1k(provider))
    }

    /// Effective price for an endpoint, honouring its override
    pub fn endpoint_price(&self, endpoint: &EndpointConfig) -> f64 {
        endpoint
            .cost_per_1k_tokens
            .unwrap_or_else(|| self.provider_price(endpoint.provider))
    }

    /// Estimated cost of `tokens` tokens on `endpoint`
    pub fn estimate(&self, endpoint: &EndpointConfig, tokens: u64) -> f64 {
        self.endpoint_price(endpoint) * tokens as f64 / 1000.0
    }
}
