//! Error handling for the Gateway
//!
//! This module defines all error types used throughout the gateway.

mod attempt;
mod helpers;
mod types;

pub use attempt::AttemptError;
pub use types::{GatewayError, Result};
