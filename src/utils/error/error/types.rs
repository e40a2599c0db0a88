//! Error types for the Gateway

use super::attempt::AttemptError;
use crate::core::providers::error::ProviderError;
use thiserror::Error;

/// Result type alias for the Gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the Gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// No endpoint was eligible and no local fallback was supplied
    #[error("No healthy endpoint available")]
    NoHealthyEndpoint,

    /// Every attempt, including the local fallback, failed
    #[error("All {} attempts failed: {}", .errors.len(), summarize(.errors))]
    AllAttemptsFailed { errors: Vec<AttemptError> },

    /// The caller cancelled the operation
    #[error("Operation cancelled")]
    Cancelled,

    /// Provider errors surfaced without failover wrapping
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Cache errors
    #[error("Cache error: {0}")]
    Cache(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

fn summarize(errors: &[AttemptError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
