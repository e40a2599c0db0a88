//! Failover engine
//!
//! Drives one call through at most `max_retry_attempts + 1` attempts, each
//! remote one on a freshly selected endpoint, with jittered backoff in
//! between. When a local fallback is active it takes the last slot of that
//! budget, leaving `max_retry_attempts` remote attempts (never fewer than
//! one). The fallback also runs early on a fatal error or when no endpoint
//! is eligible.

use super::backoff::BackoffPolicy;
use super::classify::{ErrorClass, RetryClassifier};
use crate::config::models::FailoverConfig;
use crate::core::cancel::CancellationToken;
use crate::core::endpoint::EndpointClient;
use crate::core::providers::ProviderError;
use crate::core::router::{LoadBalancer, Selection};
use crate::core::types::{CompletionRequest, CompletionResponse, ProviderKind};
use crate::core::usage::UsageTracker;
use crate::utils::error::{AttemptError, GatewayError, Result};
use futures::FutureExt;
use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

/// Local completion path invoked after remote endpoints are exhausted
pub type LocalFallback = Arc<
    dyn Fn(CompletionRequest) -> BoxFuture<'static, std::result::Result<CompletionResponse, ProviderError>>
        + Send
        + Sync,
>;

/// Wrap an async closure as a [`LocalFallback`]
pub fn local_fallback<F, Fut>(f: F) -> LocalFallback
where
    F: Fn(CompletionRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = std::result::Result<CompletionResponse, ProviderError>> + Send + 'static,
{
    Arc::new(move |request| f(request).boxed())
}

/// Progress of one call through the attempt sequence
#[derive(Debug)]
pub(crate) struct AttemptState {
    pub(crate) errors: Vec<AttemptError>,
    pub(crate) next_attempt: u32,
    remote_cap: u32,
    remote_done: bool,
}

impl AttemptState {
    pub(crate) fn new(remote_cap: u32) -> Self {
        Self {
            errors: Vec::new(),
            next_attempt: 1,
            remote_cap,
            remote_done: false,
        }
    }
}

#[derive(Debug)]
pub struct FailoverEngine {
    balancer: Arc<LoadBalancer>,
    usage: Arc<UsageTracker>,
    backoff: BackoffPolicy,
    classifier: RetryClassifier,
    max_attempts: u32,
    fallback_enabled: bool,
}

impl FailoverEngine {
    pub fn new(config: &FailoverConfig, balancer: Arc<LoadBalancer>, usage: Arc<UsageTracker>) -> Self {
        Self {
            balancer,
            usage,
            backoff: BackoffPolicy::from_config(config),
            classifier: RetryClassifier::from_config(config),
            max_attempts: config.max_attempts(),
            fallback_enabled: config.enable_local_fallback,
        }
    }

    pub fn balancer(&self) -> &Arc<LoadBalancer> {
        &self.balancer
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn fallback_enabled(&self) -> bool {
        self.fallback_enabled
    }

    /// Remote attempts allowed for one call
    pub fn remote_attempts(&self, fallback: Option<&LocalFallback>) -> u32 {
        if fallback.is_some() && self.fallback_enabled {
            self.max_attempts.saturating_sub(1).max(1)
        } else {
            self.max_attempts
        }
    }

    pub(crate) fn start(&self, fallback: Option<&LocalFallback>) -> AttemptState {
        AttemptState::new(self.remote_attempts(fallback))
    }

    /// Run `request` to success or to an aggregate failure
    pub async fn execute(
        &self,
        request: &CompletionRequest,
        fallback: Option<&LocalFallback>,
        cancel: &CancellationToken,
    ) -> Result<CompletionResponse> {
        self.run(request, fallback, cancel, true).await
    }

    /// Like [`FailoverEngine::execute`], for a request that already missed the cache
    pub async fn execute_uncached(
        &self,
        request: &CompletionRequest,
        fallback: Option<&LocalFallback>,
        cancel: &CancellationToken,
    ) -> Result<CompletionResponse> {
        self.run(request, fallback, cancel, false).await
    }

    async fn run(
        &self,
        request: &CompletionRequest,
        fallback: Option<&LocalFallback>,
        cancel: &CancellationToken,
        lookup: bool,
    ) -> Result<CompletionResponse> {
        let mut state = self.start(fallback);

        loop {
            if cancel.is_cancelled() {
                return Err(GatewayError::Cancelled);
            }
            let Some((attempt, selection)) = self.begin_remote(&mut state, request) else {
                break;
            };

            let client = Arc::clone(selection.client());
            let started = Instant::now();
            let outcome = if lookup {
                client.complete(request, cancel).await
            } else {
                client.complete_fresh(request, cancel).await
            };
            match outcome {
                Ok(response) => {
                    if !response.cache_hit {
                        let tokens = u64::from(response.usage.total_tokens());
                        self.record(&client, started.elapsed(), true, tokens);
                    }
                    debug!(endpoint = %client.id(), attempt, "Attempt succeeded");
                    return Ok(response);
                }
                Err(e) => {
                    self.handle_failure(&mut state, attempt, selection, started.elapsed(), e, cancel)
                        .await?
                }
            }
        }

        self.finish(&mut state, request, fallback, cancel).await
    }

    /// Select the endpoint for the next remote attempt
    pub(crate) fn begin_remote(
        &self,
        state: &mut AttemptState,
        request: &CompletionRequest,
    ) -> Option<(u32, Selection)> {
        if state.remote_done || state.next_attempt > state.remote_cap {
            return None;
        }

        match self.balancer.select(request) {
            Some(selection) => {
                let attempt = state.next_attempt;
                state.next_attempt += 1;
                Some((attempt, selection))
            }
            None => {
                debug!(
                    attempt = state.next_attempt,
                    "No eligible endpoint, leaving remote attempts"
                );
                state.remote_done = true;
                None
            }
        }
    }

    /// Account a failed remote attempt and wait out the backoff
    pub(crate) async fn handle_failure(
        &self,
        state: &mut AttemptState,
        attempt: u32,
        selection: Selection,
        latency: Duration,
        error: ProviderError,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let class = self.classifier.classify(&error);
        if class == ErrorClass::Cancelled {
            return Err(GatewayError::Cancelled);
        }

        let client = Arc::clone(selection.client());
        drop(selection);
        self.record(&client, latency, false, 0);
        warn!(
            endpoint = %client.id(),
            attempt,
            kind = error.kind(),
            "Attempt failed: {}",
            error
        );
        state
            .errors
            .push(AttemptError::remote(attempt, client.id(), error));

        if class == ErrorClass::Fatal {
            state.remote_done = true;
            return Ok(());
        }

        if attempt >= state.remote_cap {
            return Ok(());
        }
        if self.balancer.eligible().is_empty() {
            debug!(attempt, "No eligible endpoint left, skipping backoff");
            state.remote_done = true;
            return Ok(());
        }

        let delay = self.backoff.delay(attempt);
        debug!(attempt, "Backing off for {:?}", delay);
        cancel
            .run(tokio::time::sleep(delay))
            .await
            .map_err(|_| GatewayError::Cancelled)?;

        Ok(())
    }

    /// Try the fallback once, then turn the collected errors into the result
    pub(crate) async fn finish(
        &self,
        state: &mut AttemptState,
        request: &CompletionRequest,
        fallback: Option<&LocalFallback>,
        cancel: &CancellationToken,
    ) -> Result<CompletionResponse> {
        let fallback = fallback.filter(|_| self.fallback_enabled);

        if let Some(fallback) = fallback {
            let attempt = state.next_attempt;
            let started = Instant::now();
            match cancel.run(fallback(request.clone())).await {
                Err(_) => return Err(GatewayError::Cancelled),
                Ok(Ok(response)) => {
                    let tokens = u64::from(response.usage.total_tokens());
                    let cost = self.balancer.costs().provider_price(response.provider)
                        * tokens as f64
                        / 1000.0;
                    self.usage
                        .record(response.provider, tokens, started.elapsed(), true, cost);
                    info!(
                        remote_failures = state.errors.len(),
                        "Served by local fallback"
                    );
                    return Ok(response);
                }
                Ok(Err(e)) if e.is_cancelled() => return Err(GatewayError::Cancelled),
                Ok(Err(e)) => {
                    warn!("Local fallback failed: {}", e);
                    self.usage
                        .record(ProviderKind::Local, 0, started.elapsed(), false, 0.0);
                    state.errors.push(AttemptError::fallback(attempt, e));
                }
            }
        }

        if state.errors.is_empty() {
            error!("No healthy endpoint and no fallback");
            return Err(GatewayError::NoHealthyEndpoint);
        }

        let errors = std::mem::take(&mut state.errors);
        error!(attempts = errors.len(), "All attempts failed");
        Err(GatewayError::AllAttemptsFailed { errors })
    }

    /// Feed an attempt outcome to the rolling metrics and usage totals
    pub(crate) fn record(&self, client: &EndpointClient, latency: Duration, success: bool, tokens: u64) {
        client
            .metrics()
            .record(latency.as_millis() as u64, success, tokens);
        let cost = self.balancer.costs().estimate(client.config(), tokens);
        self.usage
            .record(client.provider(), tokens, latency, success, cost);
    }
}
