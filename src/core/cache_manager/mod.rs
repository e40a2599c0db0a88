//! Response caching
//!
//! Completed responses are cached under a key derived from the request and
//! expire after a TTL that depends on the request priority.

pub mod manager;
pub mod store;
pub mod types;


pub use manager::ResponseCache;
pub use store::{CacheStore, InMemoryCacheStore};
pub use types::{CacheKey, CacheKeyStrategy, CacheStats};
