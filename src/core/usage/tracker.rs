//! Usage tracker
//!
//! Global totals are plain atomics; the estimated cost is an `f64` kept as
//! bits and updated with a CAS loop. Per-provider records live in a
//! `DashMap`, so writers only contend on their own provider's shard.

use super::types::{UsageRecord, UsageSnapshot, UsageSummary};
use crate::core::types::ProviderKind;
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering::Relaxed};
use std::time::Duration;

#[derive(Debug, Default)]
pub struct UsageTracker {
    requests: AtomicU64,
    successes: AtomicU64,
    tokens: AtomicU64,
    latency_ms: AtomicU64,
    cost_bits: AtomicU64,
    providers: DashMap<ProviderKind, UsageRecord>,
}

impl UsageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account one completed attempt, successful or not
    pub fn record(
        &self,
        provider: ProviderKind,
        tokens: u64,
        latency: Duration,
        success: bool,
        cost_usd: f64,
    ) {
        let latency_ms = latency.as_millis() as u64;
        let cost_usd = if cost_usd.is_finite() { cost_usd.max(0.0) } else { 0.0 };

        self.requests.fetch_add(1, Relaxed);
        if success {
            self.successes.fetch_add(1, Relaxed);
        }
        self.tokens.fetch_add(tokens, Relaxed);
        self.latency_ms.fetch_add(latency_ms, Relaxed);
        let _ = self.cost_bits.fetch_update(Relaxed, Relaxed, |bits| {
            Some((f64::from_bits(bits) + cost_usd).to_bits())
        });

        let mut record = self.providers.entry(provider).or_default();
        record.requests += 1;
        if success {
            record.successes += 1;
        }
        record.tokens += tokens;
        record.cost_usd += cost_usd;
        record.total_latency_ms += latency_ms;
    }

    pub fn total(&self) -> UsageRecord {
        UsageRecord {
            requests: self.requests.load(Relaxed),
            successes: self.successes.load(Relaxed),
            tokens: self.tokens.load(Relaxed),
            cost_usd: f64::from_bits(self.cost_bits.load(Relaxed)),
            total_latency_ms: self.latency_ms.load(Relaxed),
        }
    }

    pub fn provider(&self, provider: ProviderKind) -> Option<UsageRecord> {
        self.providers.get(&provider).map(|r| r.clone())
    }

    pub fn snapshot(&self) -> UsageSnapshot {
        let providers: BTreeMap<_, _> = self
            .providers
            .iter()
            .map(|entry| (*entry.key(), UsageSummary::from(entry.value().clone())))
            .collect();

        UsageSnapshot {
            total: self.total().into(),
            providers,
            taken_at: chrono::Utc::now(),
        }
    }

    pub fn reset(&self) {
        self.requests.store(0, Relaxed);
        self.successes.store(0, Relaxed);
        self.tokens.store(0, Relaxed);
        self.latency_ms.store(0, Relaxed);
        self.cost_bits.store(0f64.to_bits(), Relaxed);
        self.providers.clear();
    }
}
