//! Rate limiter types and data structures

use serde::Serialize;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::Instant;

/// Point-in-time view of the limiter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateLimitStatus {
    /// Admissions still inside the window
    pub current: u32,
    /// Admissions allowed per window
    pub max: u32,
    /// Zero when a slot is free right now
    pub time_until_next_slot: Duration,
    /// Whether the next caller would have to wait
    pub throttled: bool,
    pub enabled: bool,
}

/// Admission queue plus the settings it is judged against
#[derive(Debug)]
pub(super) struct Window {
    pub(super) admitted: VecDeque<Instant>,
    pub(super) max_requests: u32,
    pub(super) length: Duration,
    pub(super) enabled: bool,
}

impl Window {
    /// Drop admissions that left the window
    pub(super) fn prune(&mut self, now: Instant) {
        while let Some(&oldest) = self.admitted.front() {
            if now.saturating_duration_since(oldest) >= self.length {
                self.admitted.pop_front();
            } else {
                break;
            }
        }
    }

    /// Admissions inside the window at `now`, without pruning
    pub(super) fn live(&self, now: Instant) -> impl Iterator<Item = &Instant> {
        self.admitted
            .iter()
            .filter(move |&&at| now.saturating_duration_since(at) < self.length)
    }

    /// How long until a slot frees, given `live` admissions sorted oldest first
    pub(super) fn wait_time(&self, now: Instant, live: usize, oldest: Option<Instant>) -> Duration {
        if !self.enabled || live < self.max_requests as usize {
            return Duration::ZERO;
        }
        // With more live entries than the limit (after a shrink) the slot
        // frees when enough of the oldest ones expire.
        let excess = live - self.max_requests as usize;
        let pivot = self
            .live(now)
            .nth(excess)
            .copied()
            .or(oldest)
            .unwrap_or(now);
        (pivot + self.length).saturating_duration_since(now)
    }
}
