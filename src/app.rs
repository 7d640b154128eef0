//! # Composition Root
//!
//! Wires configuration, telemetry, the connection pool, the query cache, the
//! cached store, and the upload pipeline into one application context. The
//! cache lives here rather than in ambient global state, and the uploader
//! holds the only invalidation handle.

use std::sync::Arc;

use anyhow::Result;
use sea_orm::DatabaseConnection;

use crate::backend::HttpBackend;
use crate::cache::QueryCache;
use crate::config::AppConfig;
use crate::db::init_pool;
use crate::notify::{Notifier, TracingNotifier};
use crate::store::OutletStore;
use crate::telemetry::init_tracing;
use crate::uploader::Uploader;

/// Fully wired analytics core.
pub struct AppContext {
    pub config: AppConfig,
    pub db: Arc<DatabaseConnection>,
    pub cache: Arc<QueryCache>,
    pub store: OutletStore,
    pub uploader: Arc<Uploader>,
}

impl AppContext {
    /// Initialize telemetry, connect the pool, and wire the components with
    /// the default notification sink.
    pub async fn init(config: AppConfig) -> Result<Self> {
        Self::init_with_notifier(config, Arc::new(TracingNotifier)).await
    }

    /// Same as [`AppContext::init`] but with a caller-supplied notifier,
    /// letting the embedding shell render upload outcomes its own way.
    pub async fn init_with_notifier(
        config: AppConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        config.validate()?;
        init_tracing(&config)?;

        let db = Arc::new(init_pool(&config).await?);
        let cache = Arc::new(QueryCache::new(config.cache_capacity));
        let store = OutletStore::new(db.clone(), cache.clone());
        let backend = Arc::new(HttpBackend::from_config(&config)?);
        let uploader = Arc::new(Uploader::new(backend, cache.clone(), notifier));

        Ok(Self {
            config,
            db,
            cache,
            store,
            uploader,
        })
    }
}
