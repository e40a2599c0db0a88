//! Retry, backoff and local fallback
//!
//! - `backoff` - jittered exponential delays
//! - `classify` - retryable / fatal / cancelled decisions
//! - `engine` - the attempt loop for single-shot calls
//! - `stream` - the attempt loop for streaming calls

pub mod backoff;
pub mod classify;
pub mod engine;
pub mod stream;


pub use backoff::BackoffPolicy;
pub use classify::{ErrorClass, RetryClassifier};
pub use engine::{FailoverEngine, LocalFallback, local_fallback};
