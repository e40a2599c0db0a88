//! Selection strategy implementations
//!
//! Every function takes a non-empty slice of candidates and returns the index
//! of the chosen one within that slice.

use super::metrics::MetricsSnapshot;
use crate::core::types::Priority;
use rand::Rng;
use std::cmp::Ordering;
use std::sync::atomic::{AtomicUsize, Ordering::Relaxed};

/// What a strategy sees of one eligible endpoint
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub metrics: MetricsSnapshot,
    /// Configured base weight
    pub weight: f64,
    /// Effective USD price per 1K tokens
    pub price_per_1k: f64,
}

/// Advance the shared cursor and map it onto `len` candidates
pub fn round_robin(cursor: &AtomicUsize, len: usize) -> usize {
    cursor.fetch_add(1, Relaxed) % len
}

/// Dynamic weight used by the weighted strategy
///
/// `weight × 1000/avg_ms × success% × max(100 − 10·in_flight, 10) × priority`
pub fn dynamic_weight(candidate: &Candidate, priority: Priority) -> f64 {
    let metrics = &candidate.metrics;
    let latency_factor = 1000.0 / metrics.avg_response_time_ms.max(1.0);
    let success_factor = metrics.success_rate * 100.0;
    let load_factor = (100.0 - f64::from(metrics.in_flight) * 10.0).max(10.0);

    candidate.weight * latency_factor * success_factor * load_factor * priority.weight_factor()
}

/// Weighted random selection over dynamic weights
pub fn weighted_random(candidates: &[Candidate], priority: Priority) -> usize {
    weighted_random_with(candidates, priority, &mut rand::thread_rng())
}

pub fn weighted_random_with<R: Rng + ?Sized>(
    candidates: &[Candidate],
    priority: Priority,
    rng: &mut R,
) -> usize {
    if candidates.len() == 1 {
        return 0;
    }

    let weights: Vec<f64> = candidates
        .iter()
        .map(|c| dynamic_weight(c, priority))
        .map(|w| if w.is_finite() && w > 0.0 { w } else { 0.0 })
        .collect();
    let total: f64 = weights.iter().sum();

    if total <= 0.0 {
        // All weights are 0, fall back to uniform random
        return rng.gen_range(0..candidates.len());
    }

    let mut point = rng.gen_range(0.0..total);
    for (index, weight) in weights.iter().enumerate() {
        if point < *weight {
            return index;
        }
        point -= weight;
    }

    // Float rounding can leave `point` just past the last bucket
    weights.iter().rposition(|w| *w > 0.0).unwrap_or(0)
}

/// Fewest in-flight requests, ties broken by lower average latency
pub fn least_connections(candidates: &[Candidate]) -> usize {
    min_index_by(candidates, |a, b| {
        a.metrics
            .in_flight
            .cmp(&b.metrics.in_flight)
            .then(a.metrics.avg_response_time_ms.total_cmp(&b.metrics.avg_response_time_ms))
    })
}

/// Lowest average latency, ties broken by higher success rate
pub fn fastest_response(candidates: &[Candidate]) -> usize {
    min_index_by(candidates, |a, b| {
        a.metrics
            .avg_response_time_ms
            .total_cmp(&b.metrics.avg_response_time_ms)
            .then(b.metrics.success_rate.total_cmp(&a.metrics.success_rate))
    })
}

/// Cheapest for `tokens`, ties broken by lower average latency
pub fn lowest_cost(candidates: &[Candidate], tokens: u64) -> usize {
    let cost = |c: &Candidate| c.price_per_1k * tokens as f64 / 1000.0;
    min_index_by(candidates, |a, b| {
        cost(a)
            .total_cmp(&cost(b))
            .then(a.metrics.avg_response_time_ms.total_cmp(&b.metrics.avg_response_time_ms))
    })
}

/// First index holding the minimum under `compare`
fn min_index_by<F>(candidates: &[Candidate], mut compare: F) -> usize
where
    F: FnMut(&Candidate, &Candidate) -> Ordering,
{
    let mut best = 0;
    for index in 1..candidates.len() {
        if compare(&candidates[index], &candidates[best]) == Ordering::Less {
            best = index;
        }
    }
    best
}
