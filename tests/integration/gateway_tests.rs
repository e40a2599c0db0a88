//! Gateway integration tests
//!
//! End-to-end calls through the public facade: batching, streaming,
//! health sweeps and cancellation.

#[cfg(test)]
mod tests {
    use crate::common::providers::reset;
    use crate::common::{ConfigFactory, EndpointFactory, RequestFactory, ScriptedTransport};
    use futures::StreamExt;
    use llm_relay::{
        CallOptions, CancellationToken, Gateway, GatewayError, HealthStatus, ProviderError,
        ProviderKind, StreamDelta,
    };
    use std::time::Duration;

    fn gateway(transport: std::sync::Arc<ScriptedTransport>, ids: &[&str]) -> Gateway {
        Gateway::builder()
            .with_config(ConfigFactory::uncached(
                ids.iter().map(|id| EndpointFactory::openai(id)).collect(),
            ))
            .with_provider_transport(ProviderKind::OpenAI, transport)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_complete_happy_path() {
        let transport = ScriptedTransport::new().reply("Paris").shared();
        let gateway = gateway(transport.clone(), &["a"]);

        let response = gateway
            .complete(&RequestFactory::simple("capital of France?"))
            .await
            .unwrap();

        assert_eq!(response.content, "Paris");
        assert_eq!(response.usage.total_tokens(), 30);
        assert_eq!(transport.prompts(), vec!["capital of France?"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_batch_runs_concurrently() {
        let transport = ScriptedTransport::new()
            .with_delay(Duration::from_millis(50))
            .shared();
        let gateway = gateway(transport.clone(), &["a", "b"]);

        let started = tokio::time::Instant::now();
        let responses = gateway.process_batch(&RequestFactory::batch(6)).await.unwrap();

        assert_eq!(responses.len(), 6);
        assert_eq!(transport.calls(), 6);
        assert!(started.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_batch_failure_does_not_cancel_siblings() {
        let transport = ScriptedTransport::new()
            .fail(ProviderError::authentication("test", "revoked"))
            .shared();
        let mut config = ConfigFactory::uncached(vec![EndpointFactory::openai("a")]);
        config.gateway.failover.enable_local_fallback = false;
        let gateway = Gateway::builder()
            .with_config(config)
            .with_provider_transport(ProviderKind::OpenAI, transport.clone())
            .build()
            .unwrap();

        let result = gateway.process_batch(&RequestFactory::batch(3)).await;
        assert!(matches!(result, Err(GatewayError::AllAttemptsFailed { .. })));
        assert_eq!(transport.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stream_restart_after_mid_stream_failure() {
        let transport = ScriptedTransport::new()
            .stream(vec![
                Ok(StreamDelta::Content("Hel".to_string())),
                Err(reset()),
            ])
            .stream(vec![
                Ok(StreamDelta::Content("Hello".to_string())),
                Ok(StreamDelta::Done),
            ])
            .shared();
        let gateway = gateway(transport, &["a", "b"]);

        let chunks: Vec<_> = gateway
            .stream_complete(RequestFactory::simple("greet"))
            .await
            .unwrap()
            .collect()
            .await;
        let chunks: Vec<_> = chunks.into_iter().map(Result::unwrap).collect();

        let final_attempt = chunks.last().unwrap().attempt;
        let restarted: String = chunks
            .iter()
            .filter(|c| c.attempt == final_attempt)
            .map(|c| c.content.as_str())
            .collect();
        assert_eq!(final_attempt, 2);
        assert_eq!(restarted, "Hello");
        assert!(chunks.last().unwrap().is_complete);
    }

    #[tokio::test]
    async fn test_stream_without_endpoints_fails_up_front() {
        let gateway = Gateway::builder()
            .with_config(ConfigFactory::with_endpoints(Vec::new()))
            .build()
            .unwrap();

        let result = gateway.stream_complete(RequestFactory::simple("hi")).await;
        assert!(matches!(result, Err(GatewayError::NoHealthyEndpoint)));
    }

    #[tokio::test]
    async fn test_health_sweep_excludes_failing_endpoint() {
        let healthy = ScriptedTransport::new().shared();
        let failing = ScriptedTransport::new()
            .unhealthy(ProviderError::api("test", 503, "maintenance"))
            .shared();
        let gateway = Gateway::builder()
            .with_config(ConfigFactory::uncached(vec![
                EndpointFactory::openai("up"),
                EndpointFactory::openai("down"),
            ]))
            .with_transport("up", healthy.clone())
            .with_transport("down", failing.clone())
            .build()
            .unwrap();

        let health = gateway.health_status().await;
        assert_eq!(health.overall, HealthStatus::Degraded);
        assert_eq!(health.healthy_count(), 1);

        for _ in 0..4 {
            gateway.complete(&RequestFactory::simple("hi")).await.unwrap();
        }
        assert_eq!(healthy.calls(), 4);
        assert_eq!(failing.calls(), 0);
    }

    #[tokio::test]
    async fn test_disabled_endpoint_not_counted_in_health() {
        let transport = ScriptedTransport::new().shared();
        let gateway = Gateway::builder()
            .with_config(ConfigFactory::uncached(vec![
                EndpointFactory::openai("on"),
                EndpointFactory::openai("off").with_enabled(false),
            ]))
            .with_provider_transport(ProviderKind::OpenAI, transport)
            .build()
            .unwrap();

        let health = gateway.health_status().await;
        assert_eq!(health.overall, HealthStatus::Healthy);
        assert_eq!(health.endpoints.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_in_flight_call() {
        let transport = ScriptedTransport::new()
            .with_delay(Duration::from_secs(10))
            .shared();
        let gateway = gateway(transport, &["a"]);
        let cancel = CancellationToken::new();

        let call = {
            let gateway = gateway.clone();
            let cancel = cancel.clone();
            tokio::spawn(async move {
                gateway
                    .complete_with(
                        &RequestFactory::simple("slow"),
                        CallOptions::new().with_cancel(cancel),
                    )
                    .await
            })
        };

        tokio::time::sleep(Duration::from_millis(100)).await;
        cancel.cancel();

        let err = call.await.unwrap().unwrap_err();
        assert!(matches!(err, GatewayError::Cancelled));
        let client = &gateway.balancer().endpoints()[0];
        assert_eq!(client.available_slots(), client.config().max_concurrency);
        assert_eq!(client.metrics().in_flight(), 0);
    }
}
