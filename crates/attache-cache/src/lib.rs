//! # Attache Cache
//!
//! Generational result cache for attachment listing queries.
//!
//! The adapter strips hydration from listing requests, then caches the
//! resulting identifier lists in a key-value store. Keys embed a shared
//! invalidation token; writing a tracked entity advances the token, which
//! orphans every previously stored entry without deleting anything.
//!
//! ## Example
//!
//! ```ignore
//! use attache_cache::{CacheSettings, MokaCacheStore, QueryCacheAdapter, QueryHooks};
//!
//! let settings = CacheSettings::load(None)?;
//! let store = Arc::new(MokaCacheStore::new(settings.max_capacity));
//! let adapter = QueryCacheAdapter::new(executor, store, settings);
//!
//! // Pre-query filter on the listing entry point
//! let request = adapter.filter_request(request);
//!
//! // Pre-result filter inside the host query pipeline
//! if let Some(ids) = adapter.pre_results(&request).await? {
//!     return Ok(ids);
//! }
//!
//! // Post-write notification
//! adapter.after_write(entity.id, &entity).await;
//! ```

pub mod adapter;
pub mod clock;
pub mod executor;
pub mod hooks;
pub mod key;
pub mod metrics;
pub mod settings;
pub mod store;
pub mod token;

// Re-exports
pub use adapter::{QueryCacheAdapter, prepare_request};
pub use clock::{Clock, ManualClock, SystemClock};
pub use executor::QueryExecutor;
pub use hooks::QueryHooks;
pub use key::CacheKey;
pub use self::metrics::{CacheMetrics, register_cache_metrics};
pub use settings::CacheSettings;
pub use store::{CacheStore, CacheValue, MokaCacheStore, NullCacheStore};
pub use token::{InvalidationToken, TokenStore};

// Re-export attache_core for consumers
pub use attache_core;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_defined() {
        assert!(!version().is_empty());
    }
}
