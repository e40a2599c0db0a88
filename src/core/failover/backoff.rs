//! Exponential backoff with jitter

use crate::config::models::FailoverConfig;
use rand::Rng;
use std::time::Duration;

/// Jitter band applied to every delay
pub const JITTER_MIN: f64 = 0.75;
pub const JITTER_MAX: f64 = 1.25;

/// `delay(n) = min(max, base × multiplier^(n-1) × jitter)`
#[derive(Debug, Clone, PartialEq)]
pub struct BackoffPolicy {
    base_delay: Duration,
    multiplier: f64,
    max_delay: Duration,
}

impl BackoffPolicy {
    pub fn new(base_delay: Duration, multiplier: f64, max_delay: Duration) -> Self {
        Self {
            base_delay,
            multiplier,
            max_delay,
        }
    }

    pub fn from_config(config: &FailoverConfig) -> Self {
        Self::new(config.base_delay(), config.multiplier, config.max_delay())
    }

    /// Delay after failed attempt `attempt` (1-based), freshly jittered
    pub fn delay(&self, attempt: u32) -> Duration {
        let jitter = rand::thread_rng().gen_range(JITTER_MIN..=JITTER_MAX);
        self.delay_with_jitter(attempt, jitter)
    }

    pub fn delay_with_jitter(&self, attempt: u32, jitter: f64) -> Duration {
        let millis = self.unjittered_ms(attempt) * jitter;
        let capped = millis.min(self.max_delay.as_millis() as f64).max(0.0);
        Duration::from_micros((capped * 1000.0).round() as u64)
    }

    /// Inclusive range every `delay(attempt)` falls into
    pub fn bounds(&self, attempt: u32) -> (Duration, Duration) {
        (
            self.delay_with_jitter(attempt, JITTER_MIN),
            self.delay_with_jitter(attempt, JITTER_MAX),
        )
    }

    fn unjittered_ms(&self, attempt: u32) -> f64 {
        let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        self.base_delay.as_millis() as f64 * self.multiplier.powi(exponent)
    }
}
