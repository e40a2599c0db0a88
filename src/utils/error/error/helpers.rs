//! Helper functions for creating and inspecting errors

use super::attempt::AttemptError;
use super::types::GatewayError;

impl GatewayError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn cache<S: Into<String>>(message: S) -> Self {
        Self::Cache(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Attempt history for aggregate failures, empty otherwise
    pub fn attempt_errors(&self) -> &[AttemptError] {
        match self {
            Self::AllAttemptsFailed { errors } => errors,
            _ => &[],
        }
    }

    pub fn is_cancelled(&self) -> bool {
        match self {
            Self::Cancelled => true,
            Self::Provider(e) => e.is_cancelled(),
            _ => false,
        }
    }
}
