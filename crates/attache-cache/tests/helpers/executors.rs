use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, OnceLock, Weak};

use async_trait::async_trait;
use attache_cache::{QueryCacheAdapter, QueryExecutor, QueryHooks};
use attache_core::{AttacheError, Entity, QueryOutput, QueryRequest, QueryValue, Result, params};
use parking_lot::Mutex;

/// Executor en memoria que filtra por `post_type` y registra cada llamada.
pub struct LibraryExecutor {
    records: Mutex<Vec<Entity>>,
    seen: Mutex<Vec<QueryRequest>>,
    calls: AtomicU32,
    failing: Mutex<bool>,
}

impl LibraryExecutor {
    pub fn new(records: Vec<Entity>) -> Self {
        Self {
            records: Mutex::new(records),
            seen: Mutex::new(Vec::new()),
            calls: AtomicU32::new(0),
            failing: Mutex::new(false),
        }
    }

    /// Numero de veces que se ejecuto la query real.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests recibidos, en orden.
    pub fn seen(&self) -> Vec<QueryRequest> {
        self.seen.lock().clone()
    }

    /// Agrega un registro sin pasar por ningun hook (escritura no cubierta).
    pub fn insert_silently(&self, entity: Entity) {
        self.records.lock().push(entity);
    }

    /// Hace que las siguientes ejecuciones fallen.
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock() = failing;
    }
}

#[async_trait]
impl QueryExecutor for LibraryExecutor {
    async fn execute(&self, request: &QueryRequest) -> Result<QueryOutput> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().push(request.clone());

        if *self.failing.lock() {
            return Err(AttacheError::executor(self.name(), "database unavailable"));
        }

        let post_type = request.get(params::POST_TYPE).and_then(QueryValue::as_str);
        let matches: Vec<Entity> = self
            .records
            .lock()
            .iter()
            .filter(|e| post_type.is_none_or(|t| e.is_type(t)))
            .cloned()
            .collect();

        let ids_only = request.get(params::FIELDS).and_then(QueryValue::as_str)
            == Some(params::FIELDS_IDS);
        if ids_only {
            Ok(QueryOutput::Ids(matches.into_iter().map(|e| e.id).collect()))
        } else {
            Ok(QueryOutput::Records(matches))
        }
    }

    fn name(&self) -> &str {
        "library"
    }
}

/// Executor que, como el pipeline del host, dispara `pre_results` antes de
/// consultar sus datos.
pub struct ReentrantExecutor {
    hooks: OnceLock<Weak<QueryCacheAdapter>>,
    inner: LibraryExecutor,
    nested_hook_calls: AtomicU32,
}

impl ReentrantExecutor {
    pub fn new(records: Vec<Entity>) -> Self {
        Self {
            hooks: OnceLock::new(),
            inner: LibraryExecutor::new(records),
            nested_hook_calls: AtomicU32::new(0),
        }
    }

    /// Conecta el adaptador cuyo hook se dispara en cada ejecucion.
    pub fn wire(&self, adapter: &Arc<QueryCacheAdapter>) {
        let _ = self.hooks.set(Arc::downgrade(adapter));
    }

    pub fn calls(&self) -> u32 {
        self.inner.calls()
    }

    pub fn nested_hook_calls(&self) -> u32 {
        self.nested_hook_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QueryExecutor for ReentrantExecutor {
    async fn execute(&self, request: &QueryRequest) -> Result<QueryOutput> {
        if let Some(adapter) = self.hooks.get().and_then(Weak::upgrade) {
            self.nested_hook_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(ids) = adapter.pre_results(request).await? {
                return Ok(QueryOutput::Ids(ids));
            }
        }

        self.inner.execute(request).await
    }

    fn name(&self) -> &str {
        "reentrant"
    }
}
