//! Provider transport seam
//!
//! Wire-level request/response translation for each vendor API lives
//! behind this trait. The gateway only sees structured replies and
//! [`ProviderError`]s.

use super::error::ProviderError;
use crate::config::EndpointConfig;
use crate::core::types::{CompletionRequest, TokenUsage};
use async_trait::async_trait;
use futures::Stream;
use std::fmt;
use std::pin::Pin;

/// Non-streaming reply from a provider
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderReply {
    pub content: String,
    pub usage: TokenUsage,
}

impl ProviderReply {
    pub fn new(content: impl Into<String>, usage: TokenUsage) -> Self {
        Self {
            content: content.into(),
            usage,
        }
    }
}

/// One event from a provider stream
#[derive(Debug, Clone, PartialEq)]
pub enum StreamDelta {
    /// Content fragment
    Content(String),
    /// Provider signalled the end of the completion
    Done,
}

/// Raw provider stream
///
/// A stream that ends without yielding [`StreamDelta::Done`] is treated as
/// broken.
pub type DeltaStream = Pin<Box<dyn Stream<Item = Result<StreamDelta, ProviderError>> + Send>>;

/// Transport for one provider family
#[async_trait]
pub trait ProviderTransport: Send + Sync + fmt::Debug {
    /// Execute one request/response cycle
    async fn complete(
        &self,
        endpoint: &EndpointConfig,
        credential: &str,
        request: &CompletionRequest,
    ) -> Result<ProviderReply, ProviderError>;

    /// Open a streaming completion
    async fn stream(
        &self,
        endpoint: &EndpointConfig,
        _credential: &str,
        _request: &CompletionRequest,
    ) -> Result<DeltaStream, ProviderError> {
        Err(ProviderError::invalid_request(
            endpoint.provider.as_str(),
            "streaming not supported by this transport",
        ))
    }

    /// Minimal low-cost probe used by health checks
    async fn probe(&self, endpoint: &EndpointConfig, credential: &str) -> Result<(), ProviderError> {
        let request = CompletionRequest::new("ping")
            .with_max_tokens(1)
            .with_temperature(0.0);
        self.complete(endpoint, credential, &request).await.map(|_| ())
    }
}
