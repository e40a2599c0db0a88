//! Scripted transport for unit tests

use super::error::ProviderError;
use super::transport::{DeltaStream, ProviderReply, ProviderTransport, StreamDelta};
use crate::config::EndpointConfig;
use crate::core::types::{CompletionRequest, TokenUsage};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Transport that replays queued outcomes, then answers `ok`
#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<ProviderReply, ProviderError>>>,
    streams: Mutex<VecDeque<Vec<Result<StreamDelta, ProviderError>>>>,
    probe_error: Mutex<Option<ProviderError>>,
    credentials_seen: Mutex<Vec<String>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn then_ok(self, content: &str) -> Self {
        self.replies
            .lock()
            .push_back(Ok(ProviderReply::new(content, TokenUsage::new(3, 7))));
        self
    }

    pub(crate) fn then_err(self, error: ProviderError) -> Self {
        self.replies.lock().push_back(Err(error));
        self
    }

    pub(crate) fn then_stream(self, items: Vec<Result<StreamDelta, ProviderError>>) -> Self {
        self.streams.lock().push_back(items);
        self
    }

    pub(crate) fn failing_probe(self, error: ProviderError) -> Self {
        *self.probe_error.lock() = Some(error);
        self
    }

    pub(crate) fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn credentials_seen(&self) -> Vec<String> {
        self.credentials_seen.lock().clone()
    }
}

#[async_trait]
impl ProviderTransport for ScriptedTransport {
    async fn complete(
        &self,
        _endpoint: &EndpointConfig,
        credential: &str,
        _request: &CompletionRequest,
    ) -> Result<ProviderReply, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.credentials_seen.lock().push(credential.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.replies.lock().pop_front();
        next.unwrap_or_else(|| Ok(ProviderReply::new("ok", TokenUsage::new(3, 7))))
    }

    async fn stream(
        &self,
        _endpoint: &EndpointConfig,
        credential: &str,
        _request: &CompletionRequest,
    ) -> Result<DeltaStream, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.credentials_seen.lock().push(credential.to_string());
        let items = self.streams.lock().pop_front().unwrap_or_else(|| {
            vec![
                Ok(StreamDelta::Content("ok".to_string())),
                Ok(StreamDelta::Done),
            ]
        });
        Ok(Box::pin(futures::stream::iter(items)))
    }

    async fn probe(
        &self,
        _endpoint: &EndpointConfig,
        _credential: &str,
    ) -> Result<(), ProviderError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.probe_error.lock().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
