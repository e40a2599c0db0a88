//! Custom test assertions
//!
//! Domain-specific assertions for gateway responses and errors.

use llm_relay::{CompletionResponse, GatewayError, ProviderKind};

/// Assertions for CompletionResponse
pub trait CompletionResponseAssertions {
    /// Assert the response came from a remote provider, not the cache
    fn assert_fresh_from(&self, provider: ProviderKind);

    /// Assert the response was served from the cache
    fn assert_cache_hit(&self);
}

impl CompletionResponseAssertions for CompletionResponse {
    fn assert_fresh_from(&self, provider: ProviderKind) {
        assert_eq!(self.provider, provider, "Unexpected provider");
        assert!(!self.cache_hit, "Expected a fresh response, got a cache hit");
    }

    fn assert_cache_hit(&self) {
        assert!(self.cache_hit, "Expected a cache hit");
    }
}

/// Assert `error` is an aggregate failure and return its endpoint ids,
/// with `None` for the fallback attempt
pub fn aggregate_sources(error: &GatewayError) -> Vec<Option<String>> {
    match error {
        GatewayError::AllAttemptsFailed { errors } => {
            errors.iter().map(|e| e.endpoint_id.clone()).collect()
        }
        other => panic!("Expected AllAttemptsFailed, got {:?}", other),
    }
}

/// Assert two values are approximately equal (for floats)
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr) => {
        $crate::assert_approx_eq!($left, $right, 1e-6_f64)
    };
    ($left:expr, $right:expr, $epsilon:expr) => {
        let left_val: f64 = $left as f64;
        let right_val: f64 = $right as f64;
        let diff = (left_val - right_val).abs();
        assert!(
            diff < $epsilon,
            "assertion failed: `(left ~ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` (epsilon: `{:?}`)",
            left_val,
            right_val,
            diff,
            $epsilon
        );
    };
}

/// Assert a duration lies in `[min_ms, max_ms]`
#[macro_export]
macro_rules! assert_duration_between {
    ($duration:expr, $min_ms:expr, $max_ms:expr) => {
        let millis = $duration.as_millis();
        assert!(
            millis >= $min_ms && millis <= $max_ms,
            "Duration {} ms outside [{}, {}] ms",
            millis,
            $min_ms,
            $max_ms
        );
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_approx_eq_macro() {
        assert_approx_eq!(1.0, 1.0);
        assert_approx_eq!(1.0, 1.0000001);
        assert_approx_eq!(0.1 + 0.2, 0.3, 1e-10_f64);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_approx_eq_failure() {
        assert_approx_eq!(1.0, 2.0);
    }

    #[test]
    fn test_duration_between_macro() {
        use std::time::Duration;
        assert_duration_between!(Duration::from_millis(50), 10, 100);
    }
}
