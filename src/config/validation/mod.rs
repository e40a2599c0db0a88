//! Configuration validation
//!
//! This module provides validation logic for all configuration structures.

mod gateway_validators;
mod trait_def;


pub use trait_def::Validate;
