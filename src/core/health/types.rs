//! Health status types and probe results

use crate::core::types::ProviderKind;
use serde::{Deserialize, Serialize};

/// Health status levels
///
/// Stored in an `AtomicU8` inside the rolling metrics:
/// - 0 = Healthy
/// - 1 = Degraded
/// - 2 = Unhealthy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum HealthStatus {
    /// Endpoint answers probes
    Healthy = 0,
    /// Only used for aggregates: some endpoints are down
    Degraded = 1,
    /// Probe failed or timed out
    Unhealthy = 2,
}

impl HealthStatus {
    /// Whether an endpoint in this state may be selected
    pub fn allows_requests(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }
}

impl From<u8> for HealthStatus {
    fn from(value: u8) -> Self {
        match value {
            0 => HealthStatus::Healthy,
            1 => HealthStatus::Degraded,
            _ => HealthStatus::Unhealthy,
        }
    }
}

impl From<HealthStatus> for u8 {
    fn from(status: HealthStatus) -> Self {
        status as u8
    }
}

/// Result of probing one endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointHealth {
    /// Endpoint identifier
    pub endpoint_id: String,
    /// Provider behind the endpoint
    pub provider: ProviderKind,
    /// Probe outcome
    pub status: HealthStatus,
    /// Probe round-trip time in milliseconds
    pub response_time_ms: u64,
    /// Diagnostic message for failed probes
    pub message: Option<String>,
    /// Whether the endpoint is enabled in configuration
    pub enabled: bool,
    /// When the probe completed
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

impl EndpointHealth {
    /// Create a healthy result
    pub fn healthy(endpoint_id: impl Into<String>, provider: ProviderKind, response_time_ms: u64) -> Self {
        Self {
            endpoint_id: endpoint_id.into(),
            provider,
            status: HealthStatus::Healthy,
            response_time_ms,
            message: None,
            enabled: true,
            checked_at: chrono::Utc::now(),
        }
    }

    /// Create an unhealthy result
    pub fn unhealthy(
        endpoint_id: impl Into<String>,
        provider: ProviderKind,
        message: impl Into<String>,
        response_time_ms: u64,
    ) -> Self {
        Self {
            endpoint_id: endpoint_id.into(),
            provider,
            status: HealthStatus::Unhealthy,
            response_time_ms,
            message: Some(message.into()),
            enabled: true,
            checked_at: chrono::Utc::now(),
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}
