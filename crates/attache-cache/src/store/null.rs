//! A store that never retains anything.

use std::time::Duration;

use async_trait::async_trait;

use crate::store::{CacheStore, CacheValue};

/// Store vacio: todo `get` es un miss y todo `set` se descarta.
///
/// Modela un backend de cache caido o ausente. Con este store el adaptador
/// ejecuta siempre la query real.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCacheStore;

#[async_trait]
impl CacheStore for NullCacheStore {
    async fn get(&self, _key: &str, _group: &str) -> Option<CacheValue> {
        None
    }

    async fn set(&self, _key: &str, _value: CacheValue, _group: &str, _ttl: Duration) {}

    fn name(&self) -> &str {
        "null"
    }
}
