//! Query result cache adapter.

use std::sync::Arc;
use std::time::Instant;

use attache_core::{Entity, EntityId, QueryOutput, QueryRequest, Result, params};
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::executor::QueryExecutor;
use crate::key::CacheKey;
use crate::metrics::CacheMetrics;
use crate::settings::CacheSettings;
use crate::store::{CacheStore, CacheValue};
use crate::token::{InvalidationToken, TokenStore};

/// Marca un request para cachear su resultado y le quita la hidratacion.
///
/// Pide solo IDs, sin contar filas y sin precargar metadatos. Los valores
/// previos de esos parametros se sobrescriben.
///
/// # Examples
///
/// ```
/// use attache_cache::prepare_request;
/// use attache_core::QueryRequest;
///
/// let request = prepare_request(QueryRequest::new().with_param("fields", "all"));
///
/// assert!(request.is_cacheable());
/// assert_eq!(request.get("fields").and_then(|v| v.as_str()), Some("ids"));
/// assert_eq!(request.get("no_found_rows").and_then(|v| v.as_bool()), Some(true));
/// ```
pub fn prepare_request(mut request: QueryRequest) -> QueryRequest {
    request.set(params::FIELDS, params::FIELDS_IDS);
    request.set(params::UPDATE_POST_META_CACHE, false);
    request.set(params::UPDATE_TERM_META_CACHE, false);
    request.set(params::NO_FOUND_ROWS, true);
    request.set_cacheable(true);
    request
}

/// Cachea listas de IDs de queries marcadas, con invalidacion generacional.
///
/// Cada key incluye el token de invalidacion actual. Una escritura sobre el
/// tipo de entidad seguido avanza el token, y con ello todas las keys
/// anteriores quedan inalcanzables hasta que expiran por TTL.
///
/// # Examples
///
/// ```no_run
/// use attache_cache::{CacheSettings, MokaCacheStore, QueryCacheAdapter, QueryExecutor, prepare_request};
/// use attache_core::QueryRequest;
/// use std::sync::Arc;
///
/// # async fn run(executor: Arc<dyn QueryExecutor>) -> attache_core::Result<()> {
/// let settings = CacheSettings::default();
/// let store = Arc::new(MokaCacheStore::new(settings.max_capacity));
/// let adapter = QueryCacheAdapter::new(executor, store, settings);
///
/// let request = prepare_request(QueryRequest::new().with_param("post_type", "attachment"));
/// let ids = adapter.maybe_serve_cached(&request).await?.into_ids();
/// println!("{} attachments", ids.len());
/// # Ok(())
/// # }
/// ```
pub struct QueryCacheAdapter {
    executor: Arc<dyn QueryExecutor>,
    store: Arc<dyn CacheStore>,
    tokens: TokenStore,
    settings: CacheSettings,
    metrics: CacheMetrics,
}

impl QueryCacheAdapter {
    /// Crea un adaptador que usa el reloj del sistema.
    pub fn new(
        executor: Arc<dyn QueryExecutor>,
        store: Arc<dyn CacheStore>,
        settings: CacheSettings,
    ) -> Self {
        Self::with_clock(executor, store, settings, Arc::new(SystemClock))
    }

    /// Crea un adaptador con un reloj explicito.
    pub fn with_clock(
        executor: Arc<dyn QueryExecutor>,
        store: Arc<dyn CacheStore>,
        settings: CacheSettings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let tokens = TokenStore::new(Arc::clone(&store), clock, &settings);
        Self {
            executor,
            store,
            tokens,
            settings,
            metrics: CacheMetrics::new(),
        }
    }

    /// Reemplaza las metricas, por ejemplo para compartirlas con el store.
    pub fn with_metrics(mut self, metrics: CacheMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Retorna la configuracion.
    pub fn settings(&self) -> &CacheSettings {
        &self.settings
    }

    /// Retorna las metricas para acceso externo.
    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    /// Prepara un request del listado para ser cacheado.
    pub fn prepare_request(&self, request: QueryRequest) -> QueryRequest {
        prepare_request(request)
    }

    /// Avanza el token si la entidad escrita es del tipo seguido.
    ///
    /// Retorna el nuevo token, o `None` si la escritura no es relevante.
    pub async fn on_relevant_write(
        &self,
        entity_id: EntityId,
        entity: &Entity,
    ) -> Option<InvalidationToken> {
        if !entity.is_type(&self.settings.tracked_entity_type) {
            return None;
        }

        debug!(
            entity_id = entity_id,
            entity_type = %entity.entity_type,
            "Tracked entity written"
        );
        let token = self.tokens.advance().await;
        self.metrics.record_token_advance();
        Some(token)
    }

    /// Retorna el token de invalidacion, generandolo si falta o si se fuerza.
    pub async fn invalidation_token(&self, force_update: bool) -> InvalidationToken {
        self.tokens.get(force_update).await
    }

    /// Calcula la cache key del request con el token actual.
    pub async fn cache_key(&self, request: &QueryRequest) -> Result<CacheKey> {
        let token = self.tokens.get(false).await;
        CacheKey::compute(&self.settings.key_prefix, request, token)
    }

    /// Sirve el resultado desde el cache si el request esta marcado.
    ///
    /// - Request no marcado (o ya interceptado): se ejecuta tal cual.
    /// - Hit: retorna los IDs cacheados sin llamar al executor.
    /// - Miss: ejecuta una copia interceptada, cachea los IDs y los retorna.
    ///
    /// # Errors
    ///
    /// Solo propaga errores del executor; el cache nunca falla una query.
    pub async fn maybe_serve_cached(&self, request: &QueryRequest) -> Result<QueryOutput> {
        if !request.is_cacheable() || request.is_intercepted() {
            self.metrics.record_passthrough();
            debug!(executor = %self.executor.name(), "Query not handled by cache, passing through");
            return self.executor.execute(request).await;
        }

        let start = Instant::now();
        // Copia con la que se llama al executor: un hook anidado la ignora
        let scoped = request.intercepted();

        let key = match self.cache_key(request).await {
            Ok(key) => key,
            Err(e) => {
                warn!(error = %e, "Could not compute cache key, running query uncached");
                self.metrics.record_passthrough();
                return self.executor.execute(&scoped).await;
            },
        };

        if let Some(CacheValue::Ids(ids)) = self.store.get(key.as_str(), &self.settings.group).await
        {
            self.metrics.record_hit();
            self.metrics
                .record_operation_duration("serve_hit", start.elapsed());
            debug!(key = %key, count = ids.len(), "Query cache hit");
            return Ok(QueryOutput::Ids(Arc::unwrap_or_clone(ids)));
        }

        self.metrics.record_miss();
        let ids = self.executor.execute(&scoped).await?.into_ids();

        self.store
            .set(
                key.as_str(),
                CacheValue::from(ids.clone()),
                &self.settings.group,
                self.settings.entry_ttl(),
            )
            .await;

        self.metrics
            .record_operation_duration("serve_miss", start.elapsed());
        debug!(
            key = %key,
            count = ids.len(),
            store = %self.store.name(),
            "Query cache miss, result stored"
        );

        Ok(QueryOutput::Ids(ids))
    }
}
