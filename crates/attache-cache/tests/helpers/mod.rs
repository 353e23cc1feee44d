//! Test helpers para attache-cache.

#![allow(dead_code, unused_imports)]

pub mod executors;

pub use executors::{LibraryExecutor, ReentrantExecutor};

use std::sync::Arc;

use attache_cache::{CacheSettings, ManualClock, MokaCacheStore, QueryCacheAdapter, QueryExecutor};
use attache_core::{Entity, QueryRequest};
use tracing_subscriber::EnvFilter;

/// Token inicial de los escenarios.
pub const T0: u64 = 1_700_000_000;

/// Instala un subscriber de tracing una sola vez por binario de test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_test_writer()
        .try_init();
}

/// Adaptador, store, reloj y executor conectados para un test.
pub struct Harness {
    pub adapter: Arc<QueryCacheAdapter>,
    pub store: Arc<MokaCacheStore>,
    pub clock: Arc<ManualClock>,
}

impl Harness {
    /// Crea un harness con settings por defecto y el reloj en `T0`.
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self::with_settings(executor, CacheSettings::default())
    }

    pub fn with_settings(executor: Arc<dyn QueryExecutor>, settings: CacheSettings) -> Self {
        init_tracing();
        let clock = Arc::new(ManualClock::new(T0));
        let store = Arc::new(MokaCacheStore::new(settings.max_capacity));
        let adapter = Arc::new(QueryCacheAdapter::with_clock(
            executor,
            store.clone(),
            settings,
            clock.clone(),
        ));

        Self {
            adapter,
            store,
            clock,
        }
    }
}

/// El request del escenario: `{status: "any", type: "attachment"}`.
pub fn listing_request() -> QueryRequest {
    QueryRequest::new()
        .with_param("post_status", "any")
        .with_param("post_type", "attachment")
}

/// Biblioteca de prueba: tres attachments (5, 9, 12) y un post (7).
pub fn library() -> Vec<Entity> {
    vec![
        Entity::new(5, "attachment").with_field("post_mime_type", "image/png"),
        Entity::new(7, "post"),
        Entity::new(9, "attachment").with_field("post_mime_type", "image/jpeg"),
        Entity::new(12, "attachment").with_field("post_mime_type", "video/mp4"),
    ]
}
