//! Provider-facing abstractions
//!
//! Concrete vendor transports are supplied by the embedding application;
//! this module defines the error type they report and the trait they
//! implement.

pub mod error;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::ProviderError;
pub use transport::{DeltaStream, ProviderReply, ProviderTransport, StreamDelta};
