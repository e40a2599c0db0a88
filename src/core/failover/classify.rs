//! Retry classification
//!
//! Decisions use the structured fields of [`ProviderError`] only: the
//! variant, its `kind()` name and its status code.

use crate::config::models::FailoverConfig;
use crate::core::providers::ProviderError;
use std::collections::HashSet;

/// What the failover loop does with an attempt error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Try again, possibly on another endpoint
    Retryable,
    /// Stop remote attempts and go to the fallback
    Fatal,
    /// Caller gave up; unwind immediately
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct RetryClassifier {
    statuses: HashSet<u16>,
    kinds: HashSet<String>,
}

impl RetryClassifier {
    pub fn new(statuses: impl IntoIterator<Item = u16>, kinds: impl IntoIterator<Item = String>) -> Self {
        Self {
            statuses: statuses.into_iter().collect(),
            kinds: kinds
                .into_iter()
                .map(|k| k.trim().to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn from_config(config: &FailoverConfig) -> Self {
        Self::new(
            config.retryable_status_codes.iter().copied(),
            config.retryable_error_kinds.iter().cloned(),
        )
    }

    pub fn classify(&self, error: &ProviderError) -> ErrorClass {
        if error.is_cancelled() {
            return ErrorClass::Cancelled;
        }

        let allowed_status = error
            .status_code()
            .is_some_and(|status| self.statuses.contains(&status));

        if error.is_transient() || allowed_status || self.kinds.contains(error.kind()) {
            ErrorClass::Retryable
        } else {
            ErrorClass::Fatal
        }
    }
}

impl Default for RetryClassifier {
    fn default() -> Self {
        Self::from_config(&FailoverConfig::default())
    }
}
