//! Rolling per-endpoint metrics
//!
//! Each endpoint keeps a bounded window of recent outcomes plus lock-free
//! counters for in-flight requests and health. Selection only ever takes
//! snapshots.

use crate::core::health::{EndpointHealth, HealthStatus};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicU32, AtomicU64, Ordering::Relaxed};

/// Number of outcomes kept per endpoint
pub const SAMPLE_WINDOW_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy)]
struct Sample {
    latency_ms: u64,
    success: bool,
}

/// Fixed-capacity window with running sums
#[derive(Debug)]
struct SampleWindow {
    samples: VecDeque<Sample>,
    latency_sum: u64,
    successes: usize,
}

impl SampleWindow {
    fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(SAMPLE_WINDOW_CAPACITY),
            latency_sum: 0,
            successes: 0,
        }
    }

    fn push(&mut self, sample: Sample) {
        if self.samples.len() == SAMPLE_WINDOW_CAPACITY {
            if let Some(evicted) = self.samples.pop_front() {
                self.latency_sum -= evicted.latency_ms;
                if evicted.success {
                    self.successes -= 1;
                }
            }
        }

        self.latency_sum += sample.latency_ms;
        if sample.success {
            self.successes += 1;
        }
        self.samples.push_back(sample);
    }

    fn average_latency_ms(&self) -> f64 {
        if self.samples.is_empty() {
            0.0
        } else {
            self.latency_sum as f64 / self.samples.len() as f64
        }
    }

    fn success_rate(&self) -> f64 {
        if self.samples.is_empty() {
            1.0
        } else {
            self.successes as f64 / self.samples.len() as f64
        }
    }
}

/// Point-in-time view of an endpoint's metrics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsSnapshot {
    /// Mean latency over the window, 0 when no samples yet
    pub avg_response_time_ms: f64,
    /// Successes over samples in the window, 1.0 when no samples yet
    pub success_rate: f64,
    pub in_flight: u32,
    pub health: HealthStatus,
    pub sample_count: usize,
    pub total_tokens: u64,
}

/// Health and performance record for one endpoint
#[derive(Debug)]
pub struct EndpointMetrics {
    window: Mutex<SampleWindow>,
    in_flight: AtomicU32,
    health: AtomicU8,
    last_health_check: Mutex<Option<EndpointHealth>>,
    total_tokens: AtomicU64,
}

impl Default for EndpointMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl EndpointMetrics {
    /// New endpoints start healthy
    pub fn new() -> Self {
        Self {
            window: Mutex::new(SampleWindow::new()),
            in_flight: AtomicU32::new(0),
            health: AtomicU8::new(HealthStatus::Healthy.into()),
            last_health_check: Mutex::new(None),
            total_tokens: AtomicU64::new(0),
        }
    }

    /// Push one outcome into the sample window
    pub fn record(&self, latency_ms: u64, success: bool, tokens: u64) {
        self.window.lock().push(Sample {
            latency_ms,
            success,
        });
        self.total_tokens.fetch_add(tokens, Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let (avg_response_time_ms, success_rate, sample_count) = {
            let window = self.window.lock();
            (
                window.average_latency_ms(),
                window.success_rate(),
                window.samples.len(),
            )
        };

        MetricsSnapshot {
            avg_response_time_ms,
            success_rate,
            in_flight: self.in_flight(),
            health: self.health(),
            sample_count,
            total_tokens: self.total_tokens.load(Relaxed),
        }
    }

    pub fn in_flight(&self) -> u32 {
        self.in_flight.load(Relaxed)
    }

    pub fn health(&self) -> HealthStatus {
        HealthStatus::from(self.health.load(Relaxed))
    }

    pub fn set_health_status(&self, status: HealthStatus) {
        self.health.store(status.into(), Relaxed);
    }

    /// Store a probe result and adopt its status
    pub fn record_health_check(&self, result: EndpointHealth) {
        self.set_health_status(result.status);
        *self.last_health_check.lock() = Some(result);
    }

    pub fn last_health_check(&self) -> Option<EndpointHealth> {
        self.last_health_check.lock().clone()
    }

    fn increment_in_flight(&self) {
        self.in_flight.fetch_add(1, Relaxed);
    }

    fn decrement_in_flight(&self) {
        let _ = self
            .in_flight
            .fetch_update(Relaxed, Relaxed, |current| current.checked_sub(1));
    }
}

/// Counts one in-flight request until dropped
#[derive(Debug)]
pub struct InFlightGuard {
    metrics: Arc<EndpointMetrics>,
}

impl InFlightGuard {
    pub fn new(metrics: Arc<EndpointMetrics>) -> Self {
        metrics.increment_in_flight();
        Self { metrics }
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.metrics.decrement_in_flight();
    }
}
