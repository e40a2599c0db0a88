//! Endpoint clients
//!
//! One [`EndpointClient`] per configured endpoint.

pub mod client;
pub mod credentials;


pub use client::EndpointClient;
pub use credentials::CredentialRing;
