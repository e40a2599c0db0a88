//! Core type definition module
//!
//! Contains the request, response and streaming value types shared by every
//! gateway component.

pub mod provider;
pub mod requests;
pub mod responses;
pub mod streaming;

// Re-export all public types
pub use provider::ProviderKind;
pub use requests::{CompletionRequest, Priority};
pub use responses::{CompletionResponse, TokenUsage};
pub use streaming::{ChunkStream, StreamingChunk};
