//! Cache storage trait

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::Result;

/// Keyed byte store with per-entry TTL.
///
/// Entries are immutable once written; a re-fetch simply supersedes the
/// previous entry under the same key. Implementations must report expired
/// entries as absent. Concurrent writers to the same key may race; last
/// write wins, which is acceptable because entries are idempotent
/// re-derivations of the same upstream data.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Look up an entry. Returns `None` for missing or expired entries.
    async fn get(&self, key: &str) -> Result<Option<Bytes>>;

    /// Store an entry with the given time-to-live.
    async fn put(&self, key: &str, value: Bytes, ttl: Duration) -> Result<()>;
}
