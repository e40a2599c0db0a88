//! Provider test utilities
//!
//! `ScriptedTransport` answers from a queue of canned outcomes. When the
//! queue runs dry it answers `"ok"`.

use async_trait::async_trait;
use llm_relay::config::EndpointConfig;
use llm_relay::{
    CompletionRequest, DeltaStream, ProviderError, ProviderReply, ProviderTransport, StreamDelta,
    TokenUsage,
};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

type StreamScript = Vec<Result<StreamDelta, ProviderError>>;

/// In-memory transport driven by a script
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<ProviderReply, ProviderError>>>,
    streams: Mutex<VecDeque<StreamScript>>,
    probe_error: Mutex<Option<ProviderError>>,
    prompts: Mutex<Vec<String>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep this long inside every call
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn reply(self, content: &str) -> Self {
        self.replies
            .lock()
            .push_back(Ok(ProviderReply::new(content, TokenUsage::new(10, 20))));
        self
    }

    pub fn fail(self, error: ProviderError) -> Self {
        self.replies.lock().push_back(Err(error));
        self
    }

    /// Queue `count` copies of `error`
    pub fn fail_times(self, count: usize, error: ProviderError) -> Self {
        (0..count).fold(self, |transport, _| transport.fail(error.clone()))
    }

    pub fn stream(self, items: StreamScript) -> Self {
        self.streams.lock().push_back(items);
        self
    }

    pub fn unhealthy(self, error: ProviderError) -> Self {
        *self.probe_error.lock() = Some(error);
        self
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts seen, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }

    async fn enter(&self, request: &CompletionRequest) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().push(request.prompt.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl ProviderTransport for ScriptedTransport {
    async fn complete(
        &self,
        _endpoint: &EndpointConfig,
        _credential: &str,
        request: &CompletionRequest,
    ) -> Result<ProviderReply, ProviderError> {
        self.enter(request).await;
        let next = self.replies.lock().pop_front();
        next.unwrap_or_else(|| Ok(ProviderReply::new("ok", TokenUsage::new(10, 20))))
    }

    async fn stream(
        &self,
        _endpoint: &EndpointConfig,
        _credential: &str,
        request: &CompletionRequest,
    ) -> Result<DeltaStream, ProviderError> {
        self.enter(request).await;
        let items = self.streams.lock().pop_front().unwrap_or_else(|| {
            vec![
                Ok(StreamDelta::Content("ok".to_string())),
                Ok(StreamDelta::Done),
            ]
        });
        Ok(Box::pin(futures::stream::iter(items)))
    }

    async fn probe(&self, _endpoint: &EndpointConfig, _credential: &str) -> Result<(), ProviderError> {
        match self.probe_error.lock().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// Transient network failure
pub fn reset() -> ProviderError {
    ProviderError::network("test", "connection reset by peer")
}
