//! Core functionality for the Gateway
//!
//! Endpoint clients, selection, failover, admission control, caching and
//! usage accounting. The [`crate::gateway::Gateway`] facade wires them
//! together.

pub mod cache_manager;
pub mod cancel;
pub mod endpoint;
pub mod failover;
pub mod health;
pub mod providers;
pub mod rate_limiter;
pub mod router;
pub mod types;
pub mod usage;
