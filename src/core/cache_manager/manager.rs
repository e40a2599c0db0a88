//! Response cache
//!
//! Wraps a [`CacheStore`] with key derivation, priority-dependent TTLs and
//! statistics. Shared by every endpoint client of a gateway.

use super::store::{CacheStore, InMemoryCacheStore};
use super::types::{AtomicCacheStats, CacheKey, CacheStats};
use crate::config::models::CacheConfig;
use crate::core::types::{CompletionRequest, CompletionResponse};
use crate::utils::error::Result;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tracing::{debug, info};

/// Sweep expired entries every this many stores
const CLEANUP_EVERY: u64 = 1000;

#[derive(Debug)]
pub struct ResponseCache {
    store: Arc<dyn CacheStore>,
    config: CacheConfig,
    stats: AtomicCacheStats,
}

impl ResponseCache {
    /// Cache backed by the in-memory store
    pub fn new(config: CacheConfig) -> Self {
        let store = Arc::new(InMemoryCacheStore::new(config.max_entries));
        Self::with_store(config, store)
    }

    pub fn with_store(config: CacheConfig, store: Arc<dyn CacheStore>) -> Self {
        Self {
            store,
            config,
            stats: AtomicCacheStats::default(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn key_for(&self, request: &CompletionRequest) -> Result<CacheKey> {
        CacheKey::from_request(request, self.config.key_strategy)
    }

    pub fn ttl_for(&self, request: &CompletionRequest) -> Duration {
        self.config.ttl_for(request.priority)
    }

    /// Cached response for `request`, already tagged as a cache hit
    pub async fn lookup(&self, request: &CompletionRequest) -> Result<Option<CompletionResponse>> {
        if !self.config.enabled {
            return Ok(None);
        }

        let key = self.key_for(request)?;
        match self.store.get(&key).await? {
            Some(response) => {
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                debug!("Cache hit for key: {}", key);
                Ok(Some(response.as_cache_hit()))
            }
            None => {
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                Ok(None)
            }
        }
    }

    /// Remember a freshly produced response
    pub async fn store(&self, request: &CompletionRequest, response: &CompletionResponse) -> Result<()> {
        if !self.config.enabled || response.cache_hit {
            return Ok(());
        }

        let key = self.key_for(request)?;
        let ttl = self.ttl_for(request);
        let evicted = self.store.put(key.clone(), response.clone(), ttl).await?;
        if evicted > 0 {
            self.stats.evictions.fetch_add(evicted, Ordering::Relaxed);
        }

        let stores = self.stats.stores.fetch_add(1, Ordering::Relaxed) + 1;
        if stores % CLEANUP_EVERY == 0 {
            self.cleanup_expired().await?;
        }

        debug!("Cached response for key: {} (ttl {:?})", key, ttl);
        Ok(())
    }

    /// Drop expired entries from the store
    pub async fn cleanup_expired(&self) -> Result<u64> {
        let removed = self.store.purge_expired().await?;
        if removed > 0 {
            self.stats.evictions.fetch_add(removed, Ordering::Relaxed);
            info!("Cleaned up {} expired cache entries", removed);
        }
        Ok(removed)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Get cache statistics (lock-free snapshot)
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }

    pub async fn clear(&self) -> Result<()> {
        self.store.clear().await?;
        self.stats.reset();
        info!("Response cache cleared");
        Ok(())
    }
}
