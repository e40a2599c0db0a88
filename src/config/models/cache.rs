//! Response cache configuration

use super::*;
use crate::core::cache_manager::types::CacheKeyStrategy;
use crate::core::types::Priority;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Response cache configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// How cache keys are derived from requests
    #[serde(default)]
    pub key_strategy: CacheKeyStrategy,
    /// Entry TTL in milliseconds per priority tier
    #[serde(default = "default_expiration_by_priority")]
    pub expiration_by_priority: BTreeMap<Priority, u64>,
    /// Upper bound on stored entries
    #[serde(default = "default_cache_max_entries")]
    pub max_entries: usize,
}

/// Critical requests go stale fastest, low priority ones live longest
pub fn default_expiration_by_priority() -> BTreeMap<Priority, u64> {
    BTreeMap::from([
        (Priority::Critical, 60_000),
        (Priority::High, 300_000),
        (Priority::Normal, 900_000),
        (Priority::Low, 3_600_000),
    ])
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            key_strategy: CacheKeyStrategy::default(),
            expiration_by_priority: default_expiration_by_priority(),
            max_entries: default_cache_max_entries(),
        }
    }
}

impl CacheConfig {
    /// TTL for a priority tier, falling back to the built-in table
    pub fn ttl_for(&self, priority: Priority) -> Duration {
        let millis = self
            .expiration_by_priority
            .get(&priority)
            .copied()
            .or_else(|| default_expiration_by_priority().get(&priority).copied())
            .unwrap_or(900_000);
        Duration::from_millis(millis)
    }
}
