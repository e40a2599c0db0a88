//! Destinations for usage snapshots

use super::types::UsageSnapshot;
use crate::utils::error::Result;
use async_trait::async_trait;
use tracing::{debug, info};

/// Receives periodic usage snapshots
#[async_trait]
pub trait UsageSink: Send + Sync {
    async fn publish(&self, snapshot: &UsageSnapshot) -> Result<()>;
}

/// Logs snapshots through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingUsageSink;

#[async_trait]
impl UsageSink for TracingUsageSink {
    async fn publish(&self, snapshot: &UsageSnapshot) -> Result<()> {
        let total = &snapshot.total;
        info!(
            requests = total.record.requests,
            successes = total.record.successes,
            tokens = total.record.tokens,
            cost_usd = total.record.cost_usd,
            avg_latency_ms = total.average_latency_ms,
            "Usage snapshot"
        );

        for (provider, usage) in &snapshot.providers {
            debug!(
                provider = %provider,
                requests = usage.record.requests,
                tokens = usage.record.tokens,
                success_rate = usage.success_rate,
                "Provider usage"
            );
        }

        Ok(())
    }
}
