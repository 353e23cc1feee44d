//! Host extension points.
//!
//! The host pipeline calls the adapter at three named points. Instead of
//! registering callbacks dynamically, the host's composition root holds a
//! `QueryHooks` handle and calls each method where the extension point fires.

use async_trait::async_trait;
use attache_core::{Entity, EntityId, QueryRequest, Result};

use crate::adapter::QueryCacheAdapter;

/// The three extension points a host wires the cache adapter into.
#[async_trait]
pub trait QueryHooks: Send + Sync {
    /// Pre-query filter for the attachment listing entry point.
    ///
    /// Only requests from that entry point are passed here.
    fn filter_request(&self, request: QueryRequest) -> QueryRequest;

    /// Post-write notification, fired after the host clears the cache of
    /// an entity.
    async fn after_write(&self, entity_id: EntityId, entity: &Entity);

    /// Pre-result filter, fired before the host runs any query.
    ///
    /// Returns `None` when the host should run the query itself, and the
    /// identifier list when the result was produced by the cache adapter.
    ///
    /// # Errors
    ///
    /// Propagates executor errors from a cache miss.
    async fn pre_results(&self, request: &QueryRequest) -> Result<Option<Vec<EntityId>>>;
}

#[async_trait]
impl QueryHooks for QueryCacheAdapter {
    fn filter_request(&self, request: QueryRequest) -> QueryRequest {
        self.prepare_request(request)
    }

    async fn after_write(&self, entity_id: EntityId, entity: &Entity) {
        self.on_relevant_write(entity_id, entity).await;
    }

    async fn pre_results(&self, request: &QueryRequest) -> Result<Option<Vec<EntityId>>> {
        // Un request interceptado viene del propio adaptador: el host lo ejecuta
        if !request.is_cacheable() || request.is_intercepted() {
            return Ok(None);
        }

        let output = self.maybe_serve_cached(request).await?;
        Ok(Some(output.into_ids()))
    }
}
