//! Response caching for the Blizzard API access layer
//!
//! This crate provides the caching seam used by the HTTP gateway:
//! - Deterministic cache keys derived from a request URL and its parameters
//! - The [`CacheStore`] trait, so the backing store is an injected dependency
//! - An in-memory TTL store suitable for a single long-lived process
//!
//! Caching here is a performance optimization, never a correctness
//! dependency: a failing backend surfaces an error that callers degrade to
//! a cache miss.

pub mod error;
pub mod key;
pub mod memory;
pub mod store;

pub use error::{CacheError, Result};
pub use key::cache_key;
pub use memory::MemoryStore;
pub use store::CacheStore;
