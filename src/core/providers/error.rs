//! Structured provider error
//!
//! Single error type produced by every transport. The variant and the
//! optional HTTP status are the only inputs to retry classification; the
//! message text is for humans.
//!
//! | Variant | Transient | Typical cause |
//! |---------|-----------|---------------|
//! | Timeout | Yes | transport-level deadline hit |
//! | Network | Yes | connection reset / refused |
//! | Io | Yes | socket or body read failure |
//! | Streaming | Yes | stream ended before its terminal chunk |
//! | Api | by status allow-list | non-2xx response |
//! | Authentication | No | rejected credential |
//! | InvalidRequest | No | malformed request |
//! | Cancelled | Never retried | caller cancelled |
//! | Other | No | anything else |

/// Provider error carrying structured classification data
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    #[error("Timeout for {provider}: {message}")]
    Timeout {
        provider: &'static str,
        message: String,
    },

    #[error("Network error for {provider}: {message}")]
    Network {
        provider: &'static str,
        message: String,
    },

    #[error("I/O error for {provider}: {message}")]
    Io {
        provider: &'static str,
        message: String,
    },

    #[error("API error for {provider} (status {status}): {message}")]
    Api {
        provider: &'static str,
        status: u16,
        message: String,
    },

    #[error("Authentication failed for {provider}: {message}")]
    Authentication {
        provider: &'static str,
        message: String,
    },

    #[error("Invalid request for {provider}: {message}")]
    InvalidRequest {
        provider: &'static str,
        message: String,
    },

    #[error("Streaming error for {provider}: {message}")]
    Streaming {
        provider: &'static str,
        message: String,
    },

    #[error("Operation cancelled for {provider}")]
    Cancelled { provider: &'static str },

    #[error("{provider} error: {message}")]
    Other {
        provider: &'static str,
        message: String,
    },
}

impl ProviderError {
    pub fn timeout(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Timeout {
            provider,
            message: message.into(),
        }
    }

    pub fn network(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Network {
            provider,
            message: message.into(),
        }
    }

    pub fn io(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Io {
            provider,
            message: message.into(),
        }
    }

    pub fn api(provider: &'static str, status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            provider,
            status,
            message: message.into(),
        }
    }

    pub fn authentication(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Authentication {
            provider,
            message: message.into(),
        }
    }

    pub fn invalid_request(provider: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            provider,
            message: message.into(),
        }
    }

    pub fn streaming(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Streaming {
            provider,
            message: message.into(),
        }
    }

    pub fn cancelled(provider: &'static str) -> Self {
        Self::Cancelled { provider }
    }

    pub fn other(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Other {
            provider,
            message: message.into(),
        }
    }

    /// Provider name the error originated from
    pub fn provider(&self) -> &'static str {
        match self {
            Self::Timeout { provider, .. }
            | Self::Network { provider, .. }
            | Self::Io { provider, .. }
            | Self::Api { provider, .. }
            | Self::Authentication { provider, .. }
            | Self::InvalidRequest { provider, .. }
            | Self::Streaming { provider, .. }
            | Self::Cancelled { provider }
            | Self::Other { provider, .. } => provider,
        }
    }

    /// Stable kind name, matched against `retryable_error_kinds`
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "timeout",
            Self::Network { .. } => "network",
            Self::Io { .. } => "io",
            Self::Api { .. } => "api",
            Self::Authentication { .. } => "authentication",
            Self::InvalidRequest { .. } => "invalid_request",
            Self::Streaming { .. } => "streaming",
            Self::Cancelled { .. } => "cancelled",
            Self::Other { .. } => "other",
        }
    }

    /// HTTP status carried from the transport, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Transient transport failure (timeout, reset, I/O, broken stream)
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::Network { .. } | Self::Io { .. } | Self::Streaming { .. }
        )
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    /// Credential was rejected (401/403 or an explicit authentication error)
    pub fn is_authorization_failure(&self) -> bool {
        match self {
            Self::Authentication { .. } => true,
            Self::Api { status, .. } => matches!(*status, 401 | 403),
            _ => false,
        }
    }
}
