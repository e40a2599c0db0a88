//! Usage and cost accounting

pub mod sink;
pub mod tracker;
pub mod types;


pub use sink::{TracingUsageSink, UsageSink};
pub use tracker::UsageTracker;
pub use types::{UsageRecord, UsageSnapshot, UsageSummary};
