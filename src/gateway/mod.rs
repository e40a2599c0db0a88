//! Gateway facade
//!
//! Admission control, response caching and failover behind one handle.
//! A call goes through the cache first, then the rate limiter, then the
//! failover engine, so cache hits never consume a rate-limit slot.

mod builder;
mod options;
mod tasks;


pub use builder::GatewayBuilder;
pub use options::CallOptions;

use crate::config::Config;
use crate::core::cache_manager::{CacheStats, ResponseCache};
use crate::core::failover::{FailoverEngine, LocalFallback};
use crate::core::health::SystemHealth;
use crate::core::rate_limiter::{RateLimitStatus, RateLimiter};
use crate::core::router::LoadBalancer;
use crate::core::types::{ChunkStream, CompletionRequest, CompletionResponse};
use crate::core::usage::{UsageSnapshot, UsageTracker};
use crate::utils::error::Result;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Multi-endpoint completion gateway
///
/// Cheap to clone; clones share all state.
#[derive(Clone)]
pub struct Gateway {
    config: Arc<Config>,
    balancer: Arc<LoadBalancer>,
    engine: Arc<FailoverEngine>,
    limiter: Arc<RateLimiter>,
    cache: Arc<ResponseCache>,
    usage: Arc<UsageTracker>,
    default_fallback: Option<LocalFallback>,
}

impl Gateway {
    pub fn builder() -> GatewayBuilder {
        GatewayBuilder::new()
    }

    /// Get gateway configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn balancer(&self) -> &Arc<LoadBalancer> {
        &self.balancer
    }

    pub fn cache(&self) -> &Arc<ResponseCache> {
        &self.cache
    }

    /// Complete `request` with default options
    pub async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse> {
        self.complete_with(request, CallOptions::default()).await
    }

    pub async fn complete_with(
        &self,
        request: &CompletionRequest,
        options: CallOptions,
    ) -> Result<CompletionResponse> {
        if let Some(hit) = self.cached(request).await {
            debug!(model = ?request.model, "Served from cache before admission");
            return Ok(hit);
        }

        self.limiter.acquire(&options.cancel).await?;

        let fallback = options.fallback.or_else(|| self.default_fallback.clone());
        self.engine
            .execute_uncached(request, fallback.as_ref(), &options.cancel)
            .await
    }

    /// Stream a completion with default options
    pub async fn stream_complete(&self, request: CompletionRequest) -> Result<ChunkStream> {
        self.stream_complete_with(request, CallOptions::default())
            .await
    }

    /// Stream a completion
    ///
    /// Fails before the first chunk when nothing can be opened at all.
    /// Failures after that restart the stream on the next attempt.
    pub async fn stream_complete_with(
        &self,
        request: CompletionRequest,
        options: CallOptions,
    ) -> Result<ChunkStream> {
        self.limiter.acquire(&options.cancel).await?;

        let fallback = options.fallback.or_else(|| self.default_fallback.clone());
        Arc::clone(&self.engine)
            .execute_stream(request, fallback, options.cancel)
            .await
    }

    /// Complete every request concurrently
    ///
    /// A failing request does not cancel its siblings. Results come back in
    /// request order; on failure the error of the earliest failing request
    /// is returned.
    pub async fn process_batch(
        &self,
        requests: &[CompletionRequest],
    ) -> Result<Vec<CompletionResponse>> {
        debug!("Processing batch of {} requests", requests.len());
        join_all(requests.iter().map(|request| self.complete(request)))
            .await
            .into_iter()
            .collect()
    }

    /// Probe every endpoint now and aggregate the results
    pub async fn health_status(&self) -> SystemHealth {
        let endpoints = join_all(
            self.balancer
                .endpoints()
                .iter()
                .map(|client| client.refresh_health()),
        )
        .await;

        let health = SystemHealth::new(endpoints);
        debug!(
            overall = ?health.overall,
            healthy = health.healthy_count(),
            "Health sweep completed"
        );
        health
    }

    pub fn usage_metrics(&self) -> UsageSnapshot {
        self.usage.snapshot()
    }

    /// Change limit and window; admissions already recorded are kept
    pub fn set_rate_limit_config(&self, max_requests: u32, window: Duration) -> Result<()> {
        self.limiter.set_config(max_requests, window)
    }

    pub fn rate_limit_status(&self) -> RateLimitStatus {
        self.limiter.status()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    async fn cached(&self, request: &CompletionRequest) -> Option<CompletionResponse> {
        match self.cache.lookup(request).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!("Cache lookup failed: {}", e);
                None
            }
        }
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("endpoints", &self.balancer.endpoints().len())
            .field("strategy", &self.balancer.strategy())
            .field("default_fallback", &self.default_fallback.is_some())
            .finish()
    }
}
