//! Error handling integration tests
//!
//! Retry classification and how attempt errors surface to callers.

#[cfg(test)]
mod tests {
    use crate::common::{ConfigFactory, EndpointFactory, RequestFactory, ScriptedTransport};
    use llm_relay::core::failover::{ErrorClass, RetryClassifier};
    use llm_relay::{Gateway, GatewayError, ProviderError, ProviderKind};

    // ==================== Classification ====================

    #[test]
    fn test_transient_errors_are_retryable() {
        let classifier = RetryClassifier::default();
        for error in [
            ProviderError::timeout("openai", "deadline"),
            ProviderError::network("openai", "reset"),
            ProviderError::io("openai", "broken pipe"),
            ProviderError::streaming("openai", "eof"),
        ] {
            assert_eq!(classifier.classify(&error), ErrorClass::Retryable, "{}", error);
        }
    }

    #[test]
    fn test_status_code_drives_api_errors() {
        let classifier = RetryClassifier::default();
        assert_eq!(
            classifier.classify(&ProviderError::api("openai", 429, "slow down")),
            ErrorClass::Retryable
        );
        assert_eq!(
            classifier.classify(&ProviderError::api("openai", 400, "error 503 in text")),
            ErrorClass::Fatal
        );
    }

    #[test]
    fn test_cancellation_never_retried() {
        let classifier = RetryClassifier::new([499], ["cancelled".to_string()]);
        assert_eq!(
            classifier.classify(&ProviderError::cancelled("openai")),
            ErrorClass::Cancelled
        );
    }

    // ==================== Surfacing ====================

    #[test]
    fn test_provider_error_converts() {
        let err: GatewayError = ProviderError::authentication("openai", "bad key").into();
        assert!(matches!(err, GatewayError::Provider(_)));
        assert!(err.to_string().contains("bad key"));
    }

    #[tokio::test]
    async fn test_credential_rotation_recovers() {
        let transport = ScriptedTransport::new()
            .fail(ProviderError::api("test", 401, "expired"))
            .reply("with backup key")
            .shared();
        let endpoint = EndpointFactory::openai("a").with_secondary_api_keys(vec!["sk-backup".into()]);
        let gateway = Gateway::builder()
            .with_config(ConfigFactory::uncached(vec![endpoint]))
            .with_provider_transport(ProviderKind::OpenAI, transport.clone())
            .build()
            .unwrap();

        let response = gateway.complete(&RequestFactory::simple("hi")).await.unwrap();
        assert_eq!(response.content, "with backup key");
        assert_eq!(gateway.balancer().endpoints()[0].credential_index(), 1);
        assert_eq!(gateway.usage_metrics().total.record.requests, 1);
    }

    #[tokio::test]
    async fn test_attempt_errors_name_their_endpoint() {
        let transport = ScriptedTransport::new()
            .fail(ProviderError::invalid_request("test", "unsupported parameter"))
            .shared();
        let mut config = ConfigFactory::uncached(vec![EndpointFactory::openai("only")]);
        config.gateway.failover.enable_local_fallback = false;
        let gateway = Gateway::builder()
            .with_config(config)
            .with_provider_transport(ProviderKind::OpenAI, transport)
            .build()
            .unwrap();

        let err = gateway.complete(&RequestFactory::simple("hi")).await.unwrap_err();
        let attempts = err.attempt_errors();
        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0].attempt, 1);
        assert_eq!(attempts[0].endpoint_id.as_deref(), Some("only"));
        assert_eq!(attempts[0].error.kind(), "invalid_request");
        assert!(err.to_string().contains("attempt 1 via only"));
    }
}
