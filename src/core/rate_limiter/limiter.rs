//! Core rate limiter implementation

use super::types::{RateLimitStatus, Window};
use crate::config::models::RateLimitConfig;
use crate::core::cancel::CancellationToken;
use crate::utils::error::{GatewayError, Result};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

/// Sliding-window rate limiter shared by every gateway call
#[derive(Debug)]
pub struct RateLimiter {
    window: Mutex<Window>,
    /// Admissions that had to wait at least once
    throttled_total: AtomicU64,
}

impl RateLimiter {
    /// Create a new rate limiter
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            window: Mutex::new(Window {
                admitted: VecDeque::with_capacity(config.max_requests as usize),
                max_requests: config.max_requests,
                length: config.window(),
                enabled: config.enabled,
            }),
            throttled_total: AtomicU64::new(0),
        }
    }

    /// Wait for an admission slot
    ///
    /// Only fails when `cancel` fires during the wait.
    pub async fn acquire(&self, cancel: &CancellationToken) -> Result<()> {
        let mut waited = false;

        loop {
            let wait = {
                let mut window = self.window.lock();
                let now = Instant::now();
                window.prune(now);

                if !window.enabled || window.admitted.len() < window.max_requests as usize {
                    window.admitted.push_back(now);
                    if waited {
                        self.throttled_total.fetch_add(1, Ordering::Relaxed);
                    }
                    return Ok(());
                }

                let live = window.admitted.len();
                let oldest = window.admitted.front().copied();
                window.wait_time(now, live, oldest)
            };

            debug!("Rate limit reached, waiting {:?}", wait);
            waited = true;
            cancel
                .run(tokio::time::sleep(wait))
                .await
                .map_err(|_| GatewayError::Cancelled)?;
        }
    }

    /// Take a slot only if one is free right now
    pub fn try_acquire(&self) -> bool {
        let mut window = self.window.lock();
        let now = Instant::now();
        window.prune(now);

        if !window.enabled || window.admitted.len() < window.max_requests as usize {
            window.admitted.push_back(now);
            true
        } else {
            false
        }
    }

    /// Current state, computed without touching the queue
    pub fn status(&self) -> RateLimitStatus {
        let window = self.window.lock();
        let now = Instant::now();
        let live = window.live(now).count();
        let oldest = window.live(now).next().copied();
        let time_until_next_slot = window.wait_time(now, live, oldest);

        RateLimitStatus {
            current: live.min(u32::MAX as usize) as u32,
            max: window.max_requests,
            time_until_next_slot,
            throttled: !time_until_next_slot.is_zero(),
            enabled: window.enabled,
        }
    }

    /// Replace limit and window length, keeping recorded admissions
    pub fn set_config(&self, max_requests: u32, window: Duration) -> Result<()> {
        if max_requests == 0 {
            return Err(GatewayError::validation(
                "Rate limit max requests must be greater than 0",
            ));
        }
        if window.is_zero() {
            return Err(GatewayError::validation(
                "Rate limit window must be greater than 0",
            ));
        }

        let mut state = self.window.lock();
        state.max_requests = max_requests;
        state.length = window;
        info!(max_requests, ?window, "Rate limit updated");
        Ok(())
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.window.lock().enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.window.lock().enabled
    }

    /// Number of admissions that were delayed since creation
    pub fn throttled_total(&self) -> u64 {
        self.throttled_total.load(Ordering::Relaxed)
    }
}
