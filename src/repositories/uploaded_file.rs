//! # Uploaded File Repository
//!
//! This module contains the repository implementation for upload manifests.

use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use crate::error::RepositoryError;
use crate::models::uploaded_file::{Column, Entity as UploadedFile, Model};

/// Repository for upload manifest read access.
pub struct UploadedFileRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UploadedFileRepository<'a> {
    /// Create a new UploadedFileRepository with the given database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// List all upload manifests, newest first.
    pub async fn list_files(&self) -> Result<Vec<Model>, RepositoryError> {
        let files = UploadedFile::find()
            .order_by_desc(Column::UploadedAt)
            .order_by_desc(Column::Id)
            .all(self.db)
            .await?;

        Ok(files)
    }
}
