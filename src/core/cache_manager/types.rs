//! Cache manager type definitions
//!
//! Key derivation, entries with expiry, and hit/miss statistics.

use crate::core::types::CompletionRequest;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::Instant;

/// How a cache key is derived from a request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheKeyStrategy {
    /// Hash of prompt and model only
    #[default]
    PromptAndModel,
    /// Hash of the whole serialized request
    FullRequest,
}

/// Hex-encoded SHA-256 cache key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive the key for `request` under `strategy`
    pub fn from_request(request: &CompletionRequest, strategy: CacheKeyStrategy) -> Result<Self> {
        let mut hasher = Sha256::new();

        match strategy {
            CacheKeyStrategy::PromptAndModel => {
                hasher.update(request.model.as_deref().unwrap_or_default().as_bytes());
                // Separator keeps ("ab", "c") and ("a", "bc") apart
                hasher.update([0u8]);
                hasher.update(request.prompt.as_bytes());
            }
            CacheKeyStrategy::FullRequest => {
                hasher.update(serde_json::to_vec(request)?);
            }
        }

        Ok(Self(hex::encode(hasher.finalize())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Cache entry with expiry
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The cached value
    pub value: T,
    /// When the entry was created
    pub created_at: Instant,
    /// When the entry expires
    pub expires_at: Instant,
}

impl<T> CacheEntry<T> {
    pub fn new(value: T, ttl: Duration) -> Self {
        let now = Instant::now();
        Self {
            value,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    /// Check if the entry is expired
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    pub fn age(&self) -> Duration {
        Instant::now().duration_since(self.created_at)
    }
}

/// Atomic cache statistics for lock-free hot path updates
#[derive(Debug, Default)]
pub struct AtomicCacheStats {
    pub hits: AtomicU64,
    pub misses: AtomicU64,
    pub stores: AtomicU64,
    /// Entries removed by sweeps or capacity pressure
    pub evictions: AtomicU64,
}

impl AtomicCacheStats {
    /// Create a snapshot of current stats
    pub fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            stores: self.stores.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }

    /// Reset all stats to zero
    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.stores.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
    }
}

/// Cache statistics snapshot
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub stores: u64,
    pub evictions: u64,
}

impl CacheStats {
    /// Calculate hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
