//! Completion request types

use serde::{Deserialize, Serialize};

/// Request priority tier
///
/// Drives the weighted strategy's priority factor and the cache TTL.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Critical,
}

impl Priority {
    /// Multiplier applied to endpoint weights by the weighted strategy
    pub fn weight_factor(&self) -> f64 {
        match self {
            Priority::Critical => 2.0,
            Priority::High => 1.5,
            Priority::Normal => 1.0,
            Priority::Low => 0.5,
        }
    }
}

/// A text completion request
///
/// Value type: built once with the `with_*` helpers and never mutated after
/// it enters the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Prompt text
    pub prompt: String,
    /// Optional model override (endpoint default when `None`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Completion token budget
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Priority tier
    #[serde(default)]
    pub priority: Priority,
}

impl CompletionRequest {
    /// Create a request with default parameters
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: None,
            max_tokens: 256,
            temperature: 0.7,
            priority: Priority::Normal,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Rough prompt size in tokens (4 characters per token)
    pub fn estimated_prompt_tokens(&self) -> u32 {
        let chars = self.prompt.chars().count() as u32;
        chars.div_ceil(4)
    }
}
