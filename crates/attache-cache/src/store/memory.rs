//! In-process cache store using Moka.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use moka::notification::RemovalCause;
use tracing::trace;

use crate::metrics::CacheMetrics;
use crate::store::{CacheStore, CacheValue};

/// Key interna: grupo + key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct StoreKey {
    group: String,
    key: String,
}

impl StoreKey {
    fn new(key: &str, group: &str) -> Self {
        Self {
            group: group.to_string(),
            key: key.to_string(),
        }
    }
}

/// Valor almacenado junto con su propio TTL.
#[derive(Debug, Clone)]
struct StoredEntry {
    value: CacheValue,
    ttl: Duration,
}

/// Cada entry expira segun el TTL con el que fue escrita.
struct PerEntryTtl;

impl Expiry<StoreKey, StoredEntry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &StoreKey,
        value: &StoredEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &StoreKey,
        value: &StoredEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Store en memoria usando Moka.
/// Thread-safe y async-friendly, con TTL por entry y capacidad acotada.
///
/// # Examples
///
/// ```no_run
/// use attache_cache::store::{CacheStore, CacheValue, MokaCacheStore};
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() {
/// let store = MokaCacheStore::new(10_000);
/// store
///     .set("cached_query_abc", vec![5, 9, 12].into(), "media", Duration::from_secs(60))
///     .await;
///
/// if let Some(CacheValue::Ids(ids)) = store.get("cached_query_abc", "media").await {
///     println!("Cache hit: {:?}", ids);
/// }
/// # }
/// ```
#[derive(Clone)]
pub struct MokaCacheStore {
    inner: Cache<StoreKey, StoredEntry>,
    metrics: CacheMetrics,
}

impl MokaCacheStore {
    /// Crea un store con la capacidad maxima dada.
    pub fn new(max_capacity: u64) -> Self {
        Self::with_metrics(max_capacity, CacheMetrics::new())
    }

    /// Crea un store que reporta evictions en las metricas dadas.
    pub fn with_metrics(max_capacity: u64, metrics: CacheMetrics) -> Self {
        // Configurar listener para evictions
        let eviction_metrics = metrics.clone();
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(PerEntryTtl)
            .eviction_listener(move |_key, _value, cause| {
                let reason = match cause {
                    RemovalCause::Expired => "ttl",
                    RemovalCause::Size => "capacity",
                    RemovalCause::Explicit => "manual",
                    RemovalCause::Replaced => "replaced",
                };
                eviction_metrics.record_eviction(reason);
            })
            .build();

        Self { inner, metrics }
    }

    /// Retorna el numero aproximado de entries en cache.
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }

    /// Fuerza la limpieza de entries expiradas.
    pub async fn run_pending_tasks(&self) {
        self.inner.run_pending_tasks().await;
    }

    /// Retorna las metricas para acceso externo.
    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }
}

#[async_trait]
impl CacheStore for MokaCacheStore {
    async fn get(&self, key: &str, group: &str) -> Option<CacheValue> {
        let start = Instant::now();
        let result = self
            .inner
            .get(&StoreKey::new(key, group))
            .await
            .map(|entry| entry.value);

        self.metrics
            .record_operation_duration("store_get", start.elapsed());
        result
    }

    async fn set(&self, key: &str, value: CacheValue, group: &str, ttl: Duration) {
        trace!(key = %key, group = %group, ttl_secs = ttl.as_secs(), "Store set");
        self.inner
            .insert(StoreKey::new(key, group), StoredEntry { value, ttl })
            .await;
    }

    fn name(&self) -> &str {
        "moka"
    }
}
