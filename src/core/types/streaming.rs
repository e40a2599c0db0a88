//! Streaming chunk types

use super::provider::ProviderKind;
use crate::utils::error::GatewayError;
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use uuid::Uuid;

/// One fragment of a streaming completion
///
/// All chunks of one streaming call share a `correlation_id`. The terminal
/// chunk has `is_complete = true` and empty content. When a stream fails
/// midway and is restarted on another attempt, the chunks of the new attempt
/// carry a higher `attempt` number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamingChunk {
    pub content: String,
    pub is_complete: bool,
    pub provider: ProviderKind,
    pub correlation_id: Uuid,
    pub attempt: u32,
}

impl StreamingChunk {
    /// Content-bearing chunk
    pub fn content(
        content: impl Into<String>,
        provider: ProviderKind,
        correlation_id: Uuid,
        attempt: u32,
    ) -> Self {
        Self {
            content: content.into(),
            is_complete: false,
            provider,
            correlation_id,
            attempt,
        }
    }

    /// Terminal chunk
    pub fn terminal(provider: ProviderKind, correlation_id: Uuid, attempt: u32) -> Self {
        Self {
            content: String::new(),
            is_complete: true,
            provider,
            correlation_id,
            attempt,
        }
    }
}

/// Stream returned by the gateway's streaming entry points
///
/// A failure after all attempts are exhausted is yielded as the final item.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<StreamingChunk, GatewayError>> + Send>>;
