//! Endpoint health types
//!
//! - `types` - health status levels and per-endpoint probe results
//! - `system` - aggregation of probe results into an overall status

pub mod system;
pub mod types;

pub use system::SystemHealth;
pub use types::{EndpointHealth, HealthStatus};
