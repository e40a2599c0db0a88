//! Rate limiter integration tests

#[cfg(test)]
mod tests {
    use crate::common::{ConfigFactory, EndpointFactory, RequestFactory, ScriptedTransport};
    use llm_relay::config::RateLimitConfig;
    use llm_relay::core::rate_limiter::RateLimiter;
    use llm_relay::{CancellationToken, Gateway, ProviderKind};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::Instant;

    /// Five of six concurrent callers pass at once, the sixth waits a window
    #[tokio::test(start_paused = true)]
    async fn test_sliding_window_admission() {
        let limiter = Arc::new(RateLimiter::new(&RateLimitConfig {
            enabled: true,
            max_requests: 5,
            window_ms: 1_000,
        }));
        let started = Instant::now();

        let waits = futures::future::join_all((0..6).map(|_| {
            let limiter = limiter.clone();
            async move {
                limiter.acquire(&CancellationToken::new()).await.unwrap();
                started.elapsed()
            }
        }))
        .await;

        let immediate = waits.iter().filter(|w| w.is_zero()).count();
        assert_eq!(immediate, 5);
        assert!(waits.iter().any(|w| *w >= Duration::from_secs(1)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_gateway_update_keeps_queue() {
        let mut config = ConfigFactory::uncached(vec![EndpointFactory::openai("a")]);
        config.gateway.rate_limit = RateLimitConfig {
            enabled: true,
            max_requests: 2,
            window_ms: 1_000,
        };
        let gateway = Gateway::builder()
            .with_config(config)
            .with_provider_transport(ProviderKind::OpenAI, ScriptedTransport::new().shared())
            .build()
            .unwrap();

        gateway.complete(&RequestFactory::simple("1")).await.unwrap();
        gateway.complete(&RequestFactory::simple("2")).await.unwrap();
        assert!(gateway.rate_limit_status().throttled);

        gateway
            .set_rate_limit_config(3, Duration::from_secs(1))
            .unwrap();
        let status = gateway.rate_limit_status();
        assert_eq!(status.current, 2);
        assert!(!status.throttled);

        let started = Instant::now();
        gateway.complete(&RequestFactory::simple("3")).await.unwrap();
        assert_eq!(started.elapsed(), Duration::ZERO);

        gateway.complete(&RequestFactory::simple("4")).await.unwrap();
        assert!(started.elapsed() >= Duration::from_secs(1));
    }
}
