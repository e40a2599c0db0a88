//! Per-attempt failure record

use crate::core::providers::error::ProviderError;
use std::fmt;

/// One failed attempt inside a failover sequence
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptError {
    /// 1-based attempt number across the whole sequence
    pub attempt: u32,
    /// Endpoint that served the attempt, `None` for the local fallback
    pub endpoint_id: Option<String>,
    /// Underlying failure
    pub error: ProviderError,
}

impl AttemptError {
    pub fn remote(attempt: u32, endpoint_id: impl Into<String>, error: ProviderError) -> Self {
        Self {
            attempt,
            endpoint_id: Some(endpoint_id.into()),
            error,
        }
    }

    pub fn fallback(attempt: u32, error: ProviderError) -> Self {
        Self {
            attempt,
            endpoint_id: None,
            error,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.endpoint_id.is_none()
    }

    pub fn provider(&self) -> &'static str {
        self.error.provider()
    }
}

impl fmt::Display for AttemptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.endpoint_id {
            Some(id) => write!(f, "attempt {} via {}: {}", self.attempt, id, self.error),
            None => write!(f, "attempt {} via local fallback: {}", self.attempt, self.error),
        }
    }
}
