//! Usage record types

use crate::core::types::ProviderKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Running totals for one provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub requests: u64,
    pub successes: u64,
    pub tokens: u64,
    /// Estimated spend in USD
    pub cost_usd: f64,
    pub total_latency_ms: u64,
}

impl UsageRecord {
    pub fn failures(&self) -> u64 {
        self.requests - self.successes
    }

    pub fn average_latency_ms(&self) -> f64 {
        if self.requests == 0 {
            0.0
        } else {
            self.total_latency_ms as f64 / self.requests as f64
        }
    }

    /// 1.0 when nothing was recorded yet
    pub fn success_rate(&self) -> f64 {
        if self.requests == 0 {
            1.0
        } else {
            self.successes as f64 / self.requests as f64
        }
    }
}

/// Totals plus derived figures, as published to sinks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageSummary {
    #[serde(flatten)]
    pub record: UsageRecord,
    pub average_latency_ms: f64,
    pub success_rate: f64,
}

impl From<UsageRecord> for UsageSummary {
    fn from(record: UsageRecord) -> Self {
        Self {
            average_latency_ms: record.average_latency_ms(),
            success_rate: record.success_rate(),
            record,
        }
    }
}

/// Immutable view of all usage recorded so far
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageSnapshot {
    pub total: UsageSummary,
    pub providers: BTreeMap<ProviderKind, UsageSummary>,
    pub taken_at: chrono::DateTime<chrono::Utc>,
}

impl UsageSnapshot {
    pub fn provider(&self, provider: ProviderKind) -> Option<&UsageSummary> {
        self.providers.get(&provider)
    }
}
