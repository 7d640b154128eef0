//! # Outlet Store
//!
//! Consumer-facing read surface over the two persisted collections. Every
//! read memoizes its result in the [`QueryCache`] under the matching logical
//! key, so views re-fetch only after the upload pipeline invalidates. Store
//! failures propagate; a failed read never poisons the cache.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::cache::{QueryCache, keys};
use crate::error::RepositoryError;
use crate::models::{outlet, uploaded_file};
use crate::repositories::{OutletRepository, UploadedFileRepository};

/// Cached read access to outlet records and upload manifests.
#[derive(Clone)]
pub struct OutletStore {
    db: Arc<DatabaseConnection>,
    cache: Arc<QueryCache>,
}

impl OutletStore {
    /// Create a store reading through the given cache.
    pub fn new(db: Arc<DatabaseConnection>, cache: Arc<QueryCache>) -> Self {
        Self { db, cache }
    }

    /// All outlet records, newest first.
    pub async fn outlets(&self) -> Result<Arc<Vec<outlet::Model>>, RepositoryError> {
        self.cache
            .get_or_load(keys::OUTLETS, || async {
                OutletRepository::new(&self.db).list_outlets().await
            })
            .await
    }

    /// Outlet records for one upload, newest first. `None` yields an empty
    /// sequence without touching the store or the cache.
    pub async fn outlets_by_file(
        &self,
        file_id: Option<Uuid>,
    ) -> Result<Arc<Vec<outlet::Model>>, RepositoryError> {
        let Some(file_id) = file_id else {
            return Ok(Arc::new(Vec::new()));
        };

        self.cache
            .get_or_load(&keys::outlets_by_file(&file_id), || async {
                OutletRepository::new(&self.db)
                    .list_outlets_by_file(Some(file_id))
                    .await
            })
            .await
    }

    /// All upload manifests, newest first.
    pub async fn uploaded_files(&self) -> Result<Arc<Vec<uploaded_file::Model>>, RepositoryError> {
        self.cache
            .get_or_load(keys::UPLOADED_FILES, || async {
                UploadedFileRepository::new(&self.db).list_files().await
            })
            .await
    }
}
