//! Endpoint selection
//!
//! - `strategy` - load balancing strategy definitions
//! - `metrics` - rolling per-endpoint metrics and the in-flight guard
//! - `strategy_impl` - selection functions over metric snapshots
//! - `load_balancer` - eligibility filtering and strategy dispatch

pub mod load_balancer;
pub mod metrics;
pub mod strategy;
pub mod strategy_impl;


pub use load_balancer::{LoadBalancer, Selection};
pub use metrics::{EndpointMetrics, InFlightGuard, MetricsSnapshot, SAMPLE_WINDOW_CAPACITY};
pub use strategy::LoadBalancingStrategy;
