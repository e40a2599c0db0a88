//! Configuration validation integration tests
//!
//! Loading from YAML files and rejecting invalid configurations before
//! a gateway is built.

#[cfg(test)]
mod tests {
    use crate::common::{EndpointFactory, ScriptedTransport};
    use llm_relay::config::{GatewayConfig, Validate};
    use llm_relay::{Config, Gateway, GatewayError, LoadBalancingStrategy, ProviderKind};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const GATEWAY_YAML: &str = r#"
endpoints:
  - id: primary
    provider: openai
    base_address: "https://api.openai.com/v1"
    api_key: sk-1
    max_concurrency: 2
  - id: backup
    provider: groq
    base_address: "https://api.groq.com/openai/v1"
    api_key: gsk-1
load_balancer:
  strategy: fastest_response
failover:
  max_retry_attempts: 1
  retryable_exception_types: [other]
rate_limit:
  max_requests: 100
  window_ms: 60000
"#;

    // ==================== Loading ====================

    #[tokio::test]
    async fn test_gateway_from_yaml_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(GATEWAY_YAML.as_bytes()).unwrap();

        let config = Config::from_file(file.path()).await.unwrap();
        assert_eq!(config.endpoints().len(), 2);
        assert_eq!(
            config.gateway.load_balancer.strategy,
            LoadBalancingStrategy::FastestResponse
        );

        let gateway = Gateway::builder()
            .with_config(config)
            .with_provider_transport(ProviderKind::OpenAI, ScriptedTransport::new().shared())
            .with_provider_transport(ProviderKind::Groq, ScriptedTransport::new().shared())
            .build()
            .unwrap();
        assert_eq!(gateway.balancer().endpoints().len(), 2);
        assert_eq!(gateway.rate_limit_status().max, 100);
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let yaml = "load_balancer:\n  strategy: random_walk\n";
        let err = Config::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, GatewayError::Config(_)));
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let yaml = "endpoints:\n  - id: x\n    provider: acme\n    base_address: https://acme\n";
        assert!(Config::from_yaml_str(yaml).is_err());
    }

    // ==================== Validation ====================

    #[test]
    fn test_valid_gateway_config() {
        let config = GatewayConfig {
            endpoints: vec![EndpointFactory::openai("a"), EndpointFactory::openai("b")],
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_base_address_rejected() {
        let mut endpoint = EndpointFactory::openai("a");
        endpoint.base_address = " ".to_string();
        assert!(endpoint.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let endpoint = EndpointFactory::openai("a").with_timeout_ms(0);
        let err = endpoint.validate().unwrap_err();
        assert!(err.contains("timeout"));
    }

    #[test]
    fn test_negative_cost_override_rejected() {
        let endpoint = EndpointFactory::openai("a").with_cost_per_1k_tokens(-0.1);
        assert!(endpoint.validate().is_err());
    }

    #[test]
    fn test_zero_health_interval_rejected() {
        let mut config = GatewayConfig::default();
        config.load_balancer.health_check_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_config_blocks_build() {
        let mut config = Config::default();
        config.gateway.failover.multiplier = 0.0;

        let err = Gateway::builder().with_config(config).build().unwrap_err();
        assert!(matches!(err, GatewayError::Config(_)));
    }
}
