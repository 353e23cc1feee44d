//! Attachment listing demo.
//!
//! Wires the cache adapter into a toy host: an in-memory media library, the
//! listing entry point and the post-write notification.
//!
//! The adapter runs on the system clock, so tokens have one-second
//! resolution. An upload in the same second as the cached listing leaves the
//! token unchanged and the next listing still serves the old ids. The demo
//! logs that window and recovers with a write in a later second.
//!
//! ```text
//! RUST_LOG=attache_cache=debug cargo run -p attache-cache --example attachment_listing
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use attache_cache::{
    CacheSettings, MokaCacheStore, QueryCacheAdapter, QueryExecutor, QueryHooks,
    register_cache_metrics,
};
use attache_core::{Entity, EntityId, QueryOutput, QueryRequest, QueryValue, Result, params};
use metrics_exporter_prometheus::PrometheusBuilder;
use parking_lot::RwLock;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Host media library backed by a vector.
#[derive(Default)]
struct MediaLibrary {
    entities: RwLock<Vec<Entity>>,
}

impl MediaLibrary {
    fn insert(&self, entity: Entity) {
        self.entities.write().push(entity);
    }
}

#[async_trait]
impl QueryExecutor for MediaLibrary {
    async fn execute(&self, request: &QueryRequest) -> Result<QueryOutput> {
        let post_type = request.get(params::POST_TYPE).and_then(QueryValue::as_str);
        let matches: Vec<Entity> = self
            .entities
            .read()
            .iter()
            .filter(|e| post_type.is_none_or(|t| e.is_type(t)))
            .cloned()
            .collect();

        tracing::info!(matches = matches.len(), "Media library query executed");

        if request.get(params::FIELDS).and_then(QueryValue::as_str) == Some(params::FIELDS_IDS) {
            Ok(QueryOutput::Ids(matches.iter().map(|e| e.id).collect()))
        } else {
            Ok(QueryOutput::Records(matches))
        }
    }

    fn name(&self) -> &str {
        "media-library"
    }
}

/// The listing entry point: pre-query filter, then pre-result filter.
async fn list_attachments(hooks: &dyn QueryHooks, library: &MediaLibrary) -> Result<Vec<EntityId>> {
    let request = QueryRequest::new()
        .with_param(params::POST_STATUS, "any")
        .with_param(params::POST_TYPE, "attachment");
    let request = hooks.filter_request(request);

    if let Some(ids) = hooks.pre_results(&request).await? {
        return Ok(ids);
    }
    Ok(library.execute(&request).await?.into_ids())
}

/// Stores a new attachment and fires the post-write notification.
async fn upload(hooks: &dyn QueryHooks, library: &MediaLibrary, id: EntityId, mime: &str) {
    let entity = Entity::new(id, "attachment").with_field("post_mime_type", mime);
    library.insert(entity.clone());
    hooks.after_write(id, &entity).await;
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let prometheus = PrometheusBuilder::new().install_recorder()?;
    register_cache_metrics();

    let settings = CacheSettings::load(None)?;
    tracing::info!(
        group = %settings.group,
        entry_ttl = settings.entry_ttl_seconds,
        "Attachment listing demo v{}",
        attache_cache::version()
    );

    let library = Arc::new(MediaLibrary::default());
    for (id, entity_type, mime) in [
        (5, "attachment", "image/png"),
        (7, "post", ""),
        (9, "attachment", "image/jpeg"),
        (12, "attachment", "video/mp4"),
    ] {
        library.insert(Entity::new(id, entity_type).with_field("post_mime_type", mime));
    }

    let store = Arc::new(MokaCacheStore::new(settings.max_capacity));
    let adapter = QueryCacheAdapter::new(library.clone(), store.clone(), settings);
    let hooks: &dyn QueryHooks = &adapter;

    let first = list_attachments(hooks, &library).await?;
    tracing::info!(ids = ?first, token = %adapter.invalidation_token(false).await, "First listing");

    let second = list_attachments(hooks, &library).await?;
    tracing::info!(ids = ?second, "Second listing");

    upload(hooks, &library, 13, "image/webp").await;

    let third = list_attachments(hooks, &library).await?;
    tracing::info!(ids = ?third, token = %adapter.invalidation_token(false).await, "Listing after upload");

    if !third.contains(&13) {
        tracing::warn!(
            token = %adapter.invalidation_token(false).await,
            "Upload landed in the same second as the cached listing, serving stale ids until the next tracked write"
        );

        tokio::time::sleep(Duration::from_secs(1)).await;
        upload(hooks, &library, 14, "image/avif").await;

        let fourth = list_attachments(hooks, &library).await?;
        tracing::info!(ids = ?fourth, token = %adapter.invalidation_token(false).await, "Listing after second upload");
    }

    store.run_pending_tasks().await;
    tracing::info!(
        hits = adapter.metrics().hits(),
        misses = adapter.metrics().misses(),
        hit_rate = adapter.metrics().hit_rate(),
        entries = store.entry_count(),
        "Cache summary"
    );

    println!("{}", prometheus.render());
    Ok(())
}
