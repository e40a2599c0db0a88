//! Endpoint configuration

use super::*;
use crate::core::types::ProviderKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// One configured backend provider instance
///
/// Immutable once handed to an endpoint client.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct EndpointConfig {
    /// Unique endpoint identifier
    pub id: String,
    /// Provider family
    pub provider: ProviderKind,
    /// Base address of the provider API
    pub base_address: String,
    /// Primary credential
    #[serde(default)]
    pub api_key: String,
    /// Secondary credentials, tried in order after authorization failures
    #[serde(default)]
    pub secondary_api_keys: Vec<String>,
    /// Per-attempt transport timeout
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Maximum concurrent in-flight calls to this endpoint
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Base weight for the weighted strategy
    #[serde(default = "default_weight")]
    pub weight: f64,
    /// Price override in USD per 1K tokens
    #[serde(default)]
    pub cost_per_1k_tokens: Option<f64>,
    /// Model used when a request carries no override
    #[serde(default)]
    pub default_model: Option<String>,
}

impl EndpointConfig {
    pub fn new(
        id: impl Into<String>,
        provider: ProviderKind,
        base_address: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            provider,
            base_address: base_address.into(),
            api_key: String::new(),
            secondary_api_keys: Vec::new(),
            timeout_ms: default_timeout_ms(),
            max_concurrency: default_max_concurrency(),
            enabled: true,
            weight: default_weight(),
            cost_per_1k_tokens: None,
            default_model: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_secondary_api_keys(mut self, keys: Vec<String>) -> Self {
        self.secondary_api_keys = keys;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_cost_per_1k_tokens(mut self, cost: f64) -> Self {
        self.cost_per_1k_tokens = Some(cost);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

// Credentials never reach logs
impl fmt::Debug for EndpointConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointConfig")
            .field("id", &self.id)
            .field("provider", &self.provider)
            .field("base_address", &self.base_address)
            .field("api_key", &"<redacted>")
            .field("secondary_api_keys", &self.secondary_api_keys.len())
            .field("timeout_ms", &self.timeout_ms)
            .field("max_concurrency", &self.max_concurrency)
            .field("enabled", &self.enabled)
            .field("weight", &self.weight)
            .field("cost_per_1k_tokens", &self.cost_per_1k_tokens)
            .field("default_model", &self.default_model)
            .finish()
    }
}
