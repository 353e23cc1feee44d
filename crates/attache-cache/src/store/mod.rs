//! Key-value cache stores.
//!
//! The adapter never depends on a store for correctness: a `get` that
//! returns `None` is a miss, whether the key was never written, expired,
//! or the backend is unreachable. `set` is best-effort and cannot fail.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use attache_core::EntityId;

pub mod memory;
pub mod null;

pub use memory::MokaCacheStore;
pub use null::NullCacheStore;

/// A value held by a cache store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheValue {
    /// Invalidation token, in Unix seconds.
    Token(u64),
    /// Cached identifier list, in result order.
    Ids(Arc<Vec<EntityId>>),
}

impl CacheValue {
    /// Returns the token if this value holds one.
    pub fn as_token(&self) -> Option<u64> {
        match self {
            CacheValue::Token(t) => Some(*t),
            _ => None,
        }
    }

    /// Returns the identifier list if this value holds one.
    pub fn as_ids(&self) -> Option<&Arc<Vec<EntityId>>> {
        match self {
            CacheValue::Ids(ids) => Some(ids),
            _ => None,
        }
    }
}

impl From<Vec<EntityId>> for CacheValue {
    fn from(ids: Vec<EntityId>) -> Self {
        CacheValue::Ids(Arc::new(ids))
    }
}

/// A namespaced key-value store with per-entry TTL.
///
/// Implementations must provide atomic get/set per key; concurrent writers
/// to the same key resolve as last-write-wins.
///
/// # Example
///
/// ```ignore
/// use attache_cache::store::{CacheStore, CacheValue};
///
/// struct ObjectCache;
///
/// #[async_trait]
/// impl CacheStore for ObjectCache {
///     async fn get(&self, key: &str, group: &str) -> Option<CacheValue> {
///         // Lookup in the host object cache
///     }
///
///     async fn set(&self, key: &str, value: CacheValue, group: &str, ttl: Duration) {
///         // Write to the host object cache
///     }
///
///     fn name(&self) -> &str {
///         "object-cache"
///     }
/// }
/// ```
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns the value under `key` in `group`, or `None` if it is absent,
    /// expired, or the backend could not be reached.
    async fn get(&self, key: &str, group: &str) -> Option<CacheValue>;

    /// Stores `value` under `key` in `group` for `ttl`.
    async fn set(&self, key: &str, value: CacheValue, group: &str, ttl: Duration);

    /// Returns the name of this store, used for logging.
    fn name(&self) -> &str;
}
