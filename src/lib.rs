//! # llm-relay
//!
//! A resilient completion gateway in front of several AI providers.
//!
//! ## Features
//!
//! - **Load balancing**: round robin, weighted, least connections, fastest
//!   response and lowest cost selection over healthy endpoints
//! - **Failover**: bounded retries with jittered exponential backoff, then
//!   an optional local fallback
//! - **Rate limiting**: sliding-window admission that waits instead of failing
//! - **Caching**: priority-dependent TTLs keyed by prompt and model or by
//!   the full request
//! - **Usage tracking**: per-provider requests, tokens, cost and latency
//! - **Streaming**: calls restart from scratch on another attempt when a
//!   stream breaks
//!
//! Concrete provider transports are supplied by the application through
//! [`ProviderTransport`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use llm_relay::{CompletionRequest, Config, Gateway, ProviderKind, ProviderTransport};
//! use std::sync::Arc;
//!
//! # async fn run(openai: Arc<dyn ProviderTransport>) -> llm_relay::Result<()> {
//! let config = Config::from_file("config/gateway.yaml").await?;
//! let gateway = Gateway::builder()
//!     .with_config(config)
//!     .with_provider_transport(ProviderKind::OpenAI, openai)
//!     .build()?;
//!
//! let response = gateway
//!     .complete(&CompletionRequest::new("What is the capital of France?"))
//!     .await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod gateway;
pub mod services;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{AttemptError, GatewayError, Result};

pub use core::cancel::CancellationToken;
pub use core::failover::{LocalFallback, local_fallback};
pub use core::health::{EndpointHealth, HealthStatus, SystemHealth};
pub use core::providers::{DeltaStream, ProviderError, ProviderReply, ProviderTransport, StreamDelta};
pub use core::router::LoadBalancingStrategy;
pub use core::types::{
    ChunkStream, CompletionRequest, CompletionResponse, Priority, ProviderKind, StreamingChunk,
    TokenUsage,
};
pub use core::usage::{TracingUsageSink, UsageSink, UsageSnapshot};
pub use gateway::{CallOptions, Gateway, GatewayBuilder};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
