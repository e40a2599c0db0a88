//! Completion response types

use super::provider::ProviderKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Token accounting for one completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
        }
    }

    pub fn total_tokens(&self) -> u32 {
        self.prompt_tokens + self.completion_tokens
    }
}

/// A completed response
///
/// `cache_hit` is true iff the response was served from cache without
/// contacting any endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated text
    pub content: String,
    /// Token usage
    pub usage: TokenUsage,
    /// Provider that produced the content
    pub provider: ProviderKind,
    /// When the response was produced
    pub created_at: DateTime<Utc>,
    /// Served from cache
    #[serde(default)]
    pub cache_hit: bool,
}

impl CompletionResponse {
    pub fn new(content: impl Into<String>, usage: TokenUsage, provider: ProviderKind) -> Self {
        Self {
            content: content.into(),
            usage,
            provider,
            created_at: Utc::now(),
            cache_hit: false,
        }
    }

    /// Copy of this response tagged as a cache hit
    pub fn as_cache_hit(&self) -> Self {
        Self {
            cache_hit: true,
            ..self.clone()
        }
    }
}
