//! Router integration tests
//!
//! Selection strategies observed through the gateway.

#[cfg(test)]
mod tests {
    use crate::common::{ConfigFactory, EndpointFactory, RequestFactory, ScriptedTransport};
    use llm_relay::services::CostTable;
    use llm_relay::{Gateway, LoadBalancingStrategy, ProviderKind};
    use std::sync::Arc;
    use std::time::Duration;

    fn gateway_over(
        ids: &[&str],
        strategy: LoadBalancingStrategy,
    ) -> (Gateway, Vec<Arc<ScriptedTransport>>) {
        let transports: Vec<_> = ids.iter().map(|_| ScriptedTransport::new().shared()).collect();
        let endpoints = ids.iter().map(|id| EndpointFactory::openai(id)).collect();
        let mut config = ConfigFactory::with_strategy(endpoints, strategy);
        config.gateway.cache.enabled = false;

        let builder = ids
            .iter()
            .zip(&transports)
            .fold(Gateway::builder().with_config(config), |builder, (id, t)| {
                builder.with_transport(*id, t.clone())
            });
        (builder.build().unwrap(), transports)
    }

    /// With N endpoints and k·N requests each endpoint serves exactly k
    #[tokio::test]
    async fn test_round_robin_fairness() {
        let (gateway, transports) = gateway_over(&["a", "b", "c"], LoadBalancingStrategy::RoundRobin);

        for i in 0..9 {
            gateway
                .complete(&RequestFactory::simple(&format!("r{}", i)))
                .await
                .unwrap();
        }

        assert!(transports.iter().all(|t| t.calls() == 3));
        assert_eq!(transports[0].prompts(), vec!["r0", "r3", "r6"]);
        assert_eq!(transports[1].prompts(), vec!["r1", "r4", "r7"]);
    }

    #[tokio::test]
    async fn test_least_connections_prefers_idle_endpoint() {
        let (gateway, transports) =
            gateway_over(&["busy", "idle"], LoadBalancingStrategy::LeastConnections);
        let busy = gateway.balancer().get("busy").unwrap().clone();

        let _held: Vec<_> = (0..3)
            .map(|_| llm_relay::core::router::InFlightGuard::new(busy.metrics().clone()))
            .collect();
        gateway.complete(&RequestFactory::simple("hi")).await.unwrap();

        assert_eq!(transports[0].calls(), 0);
        assert_eq!(transports[1].calls(), 1);
    }

    #[tokio::test]
    async fn test_fastest_response_uses_history() {
        let (gateway, transports) =
            gateway_over(&["slow", "fast"], LoadBalancingStrategy::FastestResponse);
        let balancer = gateway.balancer();
        balancer.record_outcome("slow", Duration::from_millis(900), true, 0);
        balancer.record_outcome("fast", Duration::from_millis(90), true, 0);

        for _ in 0..3 {
            gateway.complete(&RequestFactory::simple("hi")).await.unwrap();
        }
        assert_eq!(transports[1].calls(), 3);
    }

    #[tokio::test]
    async fn test_lowest_cost_honours_endpoint_override() {
        let mut config = ConfigFactory::with_strategy(
            vec![
                EndpointFactory::of("anthropic", ProviderKind::Anthropic),
                EndpointFactory::of("groq", ProviderKind::Groq),
                EndpointFactory::openai("discounted").with_cost_per_1k_tokens(0.00001),
            ],
            LoadBalancingStrategy::LowestCost,
        );
        config.gateway.cache.enabled = false;
        let transport = ScriptedTransport::new().shared();
        let gateway = Gateway::builder()
            .with_config(config)
            .with_provider_transport(ProviderKind::Anthropic, ScriptedTransport::new().shared())
            .with_provider_transport(ProviderKind::Groq, ScriptedTransport::new().shared())
            .with_transport("discounted", transport.clone())
            .build()
            .unwrap();

        gateway.complete(&RequestFactory::simple("hi")).await.unwrap();
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_custom_cost_table() {
        let mut config = ConfigFactory::with_strategy(
            vec![
                EndpointFactory::of("mistral", ProviderKind::Mistral),
                EndpointFactory::of("deepseek", ProviderKind::DeepSeek),
            ],
            LoadBalancingStrategy::LowestCost,
        );
        config.gateway.cache.enabled = false;
        let mistral = ScriptedTransport::new().shared();
        let gateway = Gateway::builder()
            .with_config(config)
            .with_costs(CostTable::new().with_price(ProviderKind::Mistral, 0.0))
            .with_transport("mistral", mistral.clone())
            .with_provider_transport(ProviderKind::DeepSeek, ScriptedTransport::new().shared())
            .build()
            .unwrap();

        gateway.complete(&RequestFactory::simple("hi")).await.unwrap();
        assert_eq!(mistral.calls(), 1);

        let usage = gateway.usage_metrics();
        assert_eq!(usage.provider(ProviderKind::Mistral).unwrap().record.cost_usd, 0.0);
    }

    #[tokio::test]
    async fn test_weighted_strategy_spreads_load() {
        let (gateway, transports) =
            gateway_over(&["a", "b"], LoadBalancingStrategy::WeightedRoundRobin);

        for i in 0..200 {
            gateway
                .complete(&RequestFactory::simple(&format!("r{}", i)))
                .await
                .unwrap();
        }
        assert!(transports.iter().all(|t| t.calls() > 20));
    }
}
