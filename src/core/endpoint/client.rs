//! Endpoint client
//!
//! Executes request/response cycles against one configured endpoint. Owns
//! the endpoint's concurrency slots, credentials and rolling metrics, and
//! consults the shared response cache before calling out.

use super::credentials::CredentialRing;
use crate::config::models::EndpointConfig;
use crate::core::cache_manager::ResponseCache;
use crate::core::cancel::CancellationToken;
use crate::core::health::{EndpointHealth, HealthStatus};
use crate::core::providers::{DeltaStream, ProviderError, ProviderTransport, StreamDelta};
use crate::core::router::metrics::EndpointMetrics;
use crate::core::types::{CompletionRequest, CompletionResponse, ProviderKind};
use futures::StreamExt;
use std::borrow::Cow;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::time::Instant;
use tracing::{debug, warn};

#[derive(Debug)]
pub struct EndpointClient {
    config: EndpointConfig,
    transport: Arc<dyn ProviderTransport>,
    slots: Arc<Semaphore>,
    credentials: CredentialRing,
    cache: Option<Arc<ResponseCache>>,
    metrics: Arc<EndpointMetrics>,
}

impl EndpointClient {
    pub fn new(config: EndpointConfig, transport: Arc<dyn ProviderTransport>) -> Self {
        let credentials =
            CredentialRing::new(config.api_key.clone(), config.secondary_api_keys.clone());

        Self {
            slots: Arc::new(Semaphore::new(config.max_concurrency.max(1))),
            credentials,
            config,
            transport,
            cache: None,
            metrics: Arc::new(EndpointMetrics::new()),
        }
    }

    /// Share a response cache with this client
    pub fn with_cache(mut self, cache: Arc<ResponseCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn id(&self) -> &str {
        &self.config.id
    }

    pub fn provider(&self) -> ProviderKind {
        self.config.provider
    }

    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    pub fn metrics(&self) -> &Arc<EndpointMetrics> {
        &self.metrics
    }

    /// Enabled and healthy as of the last health check
    pub fn is_eligible(&self) -> bool {
        self.config.enabled && self.metrics.health() == HealthStatus::Healthy
    }

    /// Free concurrency slots
    pub fn available_slots(&self) -> usize {
        self.slots.available_permits()
    }

    pub fn credential_index(&self) -> usize {
        self.credentials.index()
    }

    /// Switch to the next credential, wrapping back to the primary
    pub fn rotate_credential(&self) -> usize {
        let index = self.credentials.rotate();
        warn!(
            endpoint = %self.config.id,
            credential = index,
            "Rotated endpoint credential"
        );
        index
    }

    /// Execute one completion
    ///
    /// A cache hit returns without taking a slot or contacting the provider.
    pub async fn complete(
        &self,
        request: &CompletionRequest,
        cancel: &CancellationToken,
    ) -> Result<CompletionResponse, ProviderError> {
        if let Some(hit) = self.cached(request).await {
            return Ok(hit);
        }

        self.complete_fresh(request, cancel).await
    }

    /// Execute one completion without looking in the cache first
    ///
    /// For callers that already missed the cache. A successful response is
    /// still stored.
    pub async fn complete_fresh(
        &self,
        request: &CompletionRequest,
        cancel: &CancellationToken,
    ) -> Result<CompletionResponse, ProviderError> {
        let _permit = self.acquire_slot(cancel).await?;
        let resolved = self.resolve_model(request);

        let mut rotations_left = self.credentials.len() - 1;
        let response = loop {
            match self.call_once(&resolved, cancel).await {
                Err(e) if e.is_authorization_failure() && rotations_left > 0 => {
                    rotations_left -= 1;
                    debug!(endpoint = %self.config.id, "Authorization failed: {}", e);
                    self.rotate_credential();
                }
                result => break result?,
            }
        };

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.store(request, &response).await {
                warn!(endpoint = %self.config.id, "Failed to cache response: {}", e);
            }
        }

        Ok(response)
    }

    /// Open a streaming completion
    ///
    /// The returned stream holds the concurrency slot until it is dropped or
    /// reaches its terminal delta. Cancelling `cancel` ends it with a
    /// cancellation error.
    pub async fn stream(
        &self,
        request: &CompletionRequest,
        cancel: &CancellationToken,
    ) -> Result<DeltaStream, ProviderError> {
        let permit = self.acquire_slot(cancel).await?;
        let request = self.resolve_model(request);

        let mut rotations_left = self.credentials.len() - 1;
        let inner = loop {
            match self.open_stream(&request, cancel).await {
                Err(e) if e.is_authorization_failure() && rotations_left > 0 => {
                    rotations_left -= 1;
                    debug!(endpoint = %self.config.id, "Authorization failed: {}", e);
                    self.rotate_credential();
                }
                result => break result?,
            }
        };

        Ok(guarded_stream(
            inner,
            permit,
            cancel.clone(),
            self.config.provider.as_str(),
        ))
    }

    /// Probe the endpoint without touching its metrics
    pub async fn health_check(&self) -> EndpointHealth {
        let started = Instant::now();
        let probe = tokio::time::timeout(
            self.config.timeout(),
            self.transport.probe(&self.config, self.credentials.current()),
        )
        .await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let health = match probe {
            Ok(Ok(())) => EndpointHealth::healthy(&self.config.id, self.config.provider, elapsed_ms),
            Ok(Err(e)) => {
                EndpointHealth::unhealthy(&self.config.id, self.config.provider, e.to_string(), elapsed_ms)
            }
            Err(_) => EndpointHealth::unhealthy(
                &self.config.id,
                self.config.provider,
                format!("probe timed out after {}ms", self.config.timeout_ms),
                elapsed_ms,
            ),
        };

        health.with_enabled(self.config.enabled)
    }

    /// Probe and store the result, updating eligibility
    pub async fn refresh_health(&self) -> EndpointHealth {
        let health = self.health_check().await;
        if !health.is_healthy() {
            warn!(
                endpoint = %self.config.id,
                "Health check failed: {}",
                health.message.as_deref().unwrap_or("unknown")
            );
        }
        self.metrics.record_health_check(health.clone());
        health
    }

    async fn cached(&self, request: &CompletionRequest) -> Option<CompletionResponse> {
        let cache = self.cache.as_ref()?;
        match cache.lookup(request).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!(endpoint = %self.config.id, "Cache lookup failed: {}", e);
                None
            }
        }
    }

    async fn acquire_slot(
        &self,
        cancel: &CancellationToken,
    ) -> Result<OwnedSemaphorePermit, ProviderError> {
        let provider = self.config.provider.as_str();
        match cancel.run(Arc::clone(&self.slots).acquire_owned()).await {
            Ok(Ok(permit)) => Ok(permit),
            Ok(Err(_)) => Err(ProviderError::other(provider, "endpoint slots closed")),
            Err(_) => Err(ProviderError::cancelled(provider)),
        }
    }

    /// Fill in the endpoint's default model when the request has none
    fn resolve_model<'a>(&self, request: &'a CompletionRequest) -> Cow<'a, CompletionRequest> {
        match (&request.model, &self.config.default_model) {
            (None, Some(model)) => Cow::Owned(request.clone().with_model(model.clone())),
            _ => Cow::Borrowed(request),
        }
    }

    async fn call_once(
        &self,
        request: &CompletionRequest,
        cancel: &CancellationToken,
    ) -> Result<CompletionResponse, ProviderError> {
        let provider = self.config.provider.as_str();
        let call = tokio::time::timeout(
            self.config.timeout(),
            self.transport
                .complete(&self.config, self.credentials.current(), request),
        );

        match cancel.run(call).await {
            Ok(Ok(Ok(reply))) => Ok(CompletionResponse::new(
                reply.content,
                reply.usage,
                self.config.provider,
            )),
            Ok(Ok(Err(e))) => Err(e),
            Ok(Err(_)) => Err(ProviderError::timeout(
                provider,
                format!("no response within {}ms", self.config.timeout_ms),
            )),
            Err(_) => Err(ProviderError::cancelled(provider)),
        }
    }

    async fn open_stream(
        &self,
        request: &CompletionRequest,
        cancel: &CancellationToken,
    ) -> Result<DeltaStream, ProviderError> {
        let provider = self.config.provider.as_str();
        let open = tokio::time::timeout(
            self.config.timeout(),
            self.transport
                .stream(&self.config, self.credentials.current(), request),
        );

        match cancel.run(open).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(ProviderError::timeout(
                provider,
                format!("stream not opened within {}ms", self.config.timeout_ms),
            )),
            Err(_) => Err(ProviderError::cancelled(provider)),
        }
    }
}

/// Wrap a provider stream so it owns the slot and observes cancellation
fn guarded_stream(
    mut inner: DeltaStream,
    permit: OwnedSemaphorePermit,
    cancel: CancellationToken,
    provider: &'static str,
) -> DeltaStream {
    Box::pin(async_stream::stream! {
        let _permit = permit;
        loop {
            let next = match cancel.run(inner.next()).await {
                Ok(next) => next,
                Err(_) => Some(Err(ProviderError::cancelled(provider))),
            };

            let Some(item) = next else { break };
            let last = matches!(item, Ok(StreamDelta::Done) | Err(_));
            yield item;
            if last {
                break;
            }
        }
    })
}
