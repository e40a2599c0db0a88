//! Rate Limiting Implementation
//!
//! Sliding-window admission control. Callers over the limit are suspended
//! until the oldest admission leaves the window; they are never rejected.

mod limiter;
mod types;


// Re-export public types
pub use limiter::RateLimiter;
pub use types::RateLimitStatus;
