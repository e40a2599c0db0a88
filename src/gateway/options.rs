//! Per-call options

use crate::core::cancel::CancellationToken;
use crate::core::failover::LocalFallback;
use std::fmt;

/// Options for a single gateway call
///
/// A fallback given here replaces the gateway's default fallback for this
/// call only. Both are ignored when local fallback is disabled in config.
#[derive(Clone, Default)]
pub struct CallOptions {
    pub fallback: Option<LocalFallback>,
    pub cancel: CancellationToken,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fallback(mut self, fallback: LocalFallback) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}

impl fmt::Debug for CallOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallOptions")
            .field("fallback", &self.fallback.is_some())
            .field("cancel", &self.cancel)
            .finish()
    }
}
