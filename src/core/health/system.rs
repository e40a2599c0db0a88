//! Overall gateway health

use super::types::{EndpointHealth, HealthStatus};
use serde::{Deserialize, Serialize};

/// Snapshot produced by a forced health sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemHealth {
    /// Aggregate over enabled endpoints
    pub overall: HealthStatus,
    /// One entry per configured endpoint, disabled ones included
    pub endpoints: Vec<EndpointHealth>,
    /// When the sweep finished
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

impl SystemHealth {
    pub fn new(endpoints: Vec<EndpointHealth>) -> Self {
        Self {
            overall: Self::overall_status(&endpoints),
            endpoints,
            checked_at: chrono::Utc::now(),
        }
    }

    /// Healthy when every enabled endpoint is healthy, Unhealthy when none is,
    /// Degraded otherwise. No enabled endpoints counts as Unhealthy.
    pub fn overall_status(endpoints: &[EndpointHealth]) -> HealthStatus {
        let enabled: Vec<_> = endpoints.iter().filter(|e| e.enabled).collect();
        if enabled.is_empty() {
            return HealthStatus::Unhealthy;
        }

        let healthy = enabled.iter().filter(|e| e.is_healthy()).count();
        if healthy == enabled.len() {
            HealthStatus::Healthy
        } else if healthy == 0 {
            HealthStatus::Unhealthy
        } else {
            HealthStatus::Degraded
        }
    }

    pub fn healthy_count(&self) -> usize {
        self.endpoints.iter().filter(|e| e.enabled && e.is_healthy()).count()
    }

    pub fn get(&self, endpoint_id: &str) -> Option<&EndpointHealth> {
        self.endpoints.iter().find(|e| e.endpoint_id == endpoint_id)
    }
}
