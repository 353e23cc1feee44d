//! Cache metrics recording.

use metrics::{counter, histogram};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Registra las metricas de cache.
/// Llamar una vez al inicio para registrar las metricas.
pub fn register_cache_metrics() {
    metrics::describe_counter!("attache_cache_hits_total", "Total number of cache hits");
    metrics::describe_counter!("attache_cache_misses_total", "Total number of cache misses");
    metrics::describe_counter!(
        "attache_cache_passthrough_total",
        "Total number of queries passed straight to the executor"
    );
    metrics::describe_counter!(
        "attache_token_advances_total",
        "Total number of invalidation token advances"
    );
    metrics::describe_counter!(
        "attache_cache_evictions_total",
        "Total number of cache evictions"
    );
    metrics::describe_histogram!(
        "attache_cache_operation_seconds",
        "Time spent on cache operations"
    );
}

/// Recorder de metricas de cache.
/// Usa atomic counters internos para maximo rendimiento.
#[derive(Debug, Clone, Default)]
pub struct CacheMetrics {
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
    passthroughs: Arc<AtomicU64>,
    token_advances: Arc<AtomicU64>,
}

impl CacheMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra un cache hit
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
        counter!("attache_cache_hits_total").increment(1);
    }

    /// Registra un cache miss
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        counter!("attache_cache_misses_total").increment(1);
    }

    /// Registra una query que no paso por el cache
    pub fn record_passthrough(&self) {
        self.passthroughs.fetch_add(1, Ordering::Relaxed);
        counter!("attache_cache_passthrough_total").increment(1);
    }

    /// Registra un avance del token de invalidacion
    pub fn record_token_advance(&self) {
        self.token_advances.fetch_add(1, Ordering::Relaxed);
        counter!("attache_token_advances_total").increment(1);
    }

    /// Registra una eviction
    pub fn record_eviction(&self, reason: &str) {
        counter!("attache_cache_evictions_total", "reason" => reason.to_string()).increment(1);
    }

    /// Registra la duracion de una operacion
    pub fn record_operation_duration(&self, operation: &str, duration: Duration) {
        histogram!(
            "attache_cache_operation_seconds",
            "operation" => operation.to_string()
        )
        .record(duration.as_secs_f64());
    }

    /// Calcula hit rate (para logging/debugging)
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits() as f64;
        let misses = self.misses() as f64;
        let total = hits + misses;
        if total == 0.0 { 0.0 } else { hits / total }
    }

    /// Retorna el numero de hits
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Retorna el numero de misses
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Retorna el numero de queries sin cache
    pub fn passthroughs(&self) -> u64 {
        self.passthroughs.load(Ordering::Relaxed)
    }

    /// Retorna el numero de avances del token
    pub fn token_advances(&self) -> u64 {
        self.token_advances.load(Ordering::Relaxed)
    }
}
