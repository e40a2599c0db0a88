//! Services module
//!
//! Supporting services shared by the core components.

pub mod pricing;

pub use pricing::CostTable;
