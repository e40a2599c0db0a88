//! Key-value store behind the response cache

use super::types::{CacheEntry, CacheKey};
use crate::core::types::CompletionResponse;
use crate::utils::error::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Pluggable cache backend
#[async_trait]
pub trait CacheStore: Send + Sync + fmt::Debug {
    /// Fetch a live entry; expired entries read as absent
    async fn get(&self, key: &CacheKey) -> Result<Option<CompletionResponse>>;

    /// Insert or replace an entry. Returns how many other entries were
    /// evicted to make room.
    async fn put(&self, key: CacheKey, value: CompletionResponse, ttl: Duration) -> Result<u64>;

    async fn remove(&self, key: &CacheKey) -> Result<()>;

    /// Drop every expired entry, returning how many were removed
    async fn purge_expired(&self) -> Result<u64>;

    async fn clear(&self) -> Result<()>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Bounded in-process store
#[derive(Debug)]
pub struct InMemoryCacheStore {
    entries: DashMap<CacheKey, CacheEntry<CompletionResponse>>,
    max_entries: usize,
}

impl InMemoryCacheStore {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            max_entries: max_entries.max(1),
        }
    }

    fn purge_expired_sync(&self) -> u64 {
        let mut removed = 0u64;
        self.entries.retain(|_, entry| {
            if entry.is_expired() {
                removed += 1;
                false
            } else {
                true
            }
        });
        removed
    }

    /// Remove the entry closest to expiry
    fn evict_soonest(&self) -> u64 {
        let victim = self
            .entries
            .iter()
            .min_by_key(|entry| entry.value().expires_at)
            .map(|entry| entry.key().clone());

        match victim {
            Some(key) => {
                self.entries.remove(&key);
                1
            }
            None => 0,
        }
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get(&self, key: &CacheKey) -> Result<Option<CompletionResponse>> {
        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired() => return Ok(Some(entry.value.clone())),
            Some(_) => true,
            None => false,
        };

        if expired {
            self.entries.remove_if(key, |_, entry| entry.is_expired());
            debug!("Dropped expired cache entry {}", key);
        }
        Ok(None)
    }

    async fn put(&self, key: CacheKey, value: CompletionResponse, ttl: Duration) -> Result<u64> {
        let mut evicted = 0;
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            evicted += self.purge_expired_sync();
            if self.entries.len() >= self.max_entries {
                evicted += self.evict_soonest();
            }
        }

        self.entries.insert(key, CacheEntry::new(value, ttl));
        Ok(evicted)
    }

    async fn remove(&self, key: &CacheKey) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }

    async fn purge_expired(&self) -> Result<u64> {
        Ok(self.purge_expired_sync())
    }

    async fn clear(&self) -> Result<()> {
        self.entries.clear();
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
