//! # Outlet Repository
//!
//! This module contains the repository implementation for outlet financial
//! records, providing ordered listings and per-file filtering.

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::models::outlet::{Column, Entity as Outlet, Model};

/// Repository for outlet record read access.
pub struct OutletRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> OutletRepository<'a> {
    /// Create a new OutletRepository with the given database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// List all outlet records, newest first.
    ///
    /// Ordered by created_at DESC with id DESC as a stable tiebreak, since
    /// bulk inserts from one upload share a creation timestamp.
    pub async fn list_outlets(&self) -> Result<Vec<Model>, RepositoryError> {
        let outlets = Outlet::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(self.db)
            .await?;

        Ok(outlets)
    }

    /// List outlet records produced by one upload, newest first.
    ///
    /// `None` is a legal input meaning "no file selected" and yields an empty
    /// sequence without touching the store.
    pub async fn list_outlets_by_file(
        &self,
        file_id: Option<Uuid>,
    ) -> Result<Vec<Model>, RepositoryError> {
        let Some(file_id) = file_id else {
            return Ok(Vec::new());
        };

        let outlets = Outlet::find()
            .filter(Column::FileId.eq(file_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(self.db)
            .await?;

        Ok(outlets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{insert_manifest, insert_outlet, setup_test_db};
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_list_outlets_empty() {
        let db = setup_test_db().await;
        let repo = OutletRepository::new(&db);

        let outlets = repo.list_outlets().await.unwrap();

        assert!(outlets.is_empty());
    }

    #[tokio::test]
    async fn test_list_outlets_newest_first() {
        let db = setup_test_db().await;
        let repo = OutletRepository::new(&db);

        let now = Utc::now();
        for i in 0..4 {
            insert_outlet(
                &db,
                &format!("Outlet {}", i),
                None,
                now - Duration::seconds(i),
            )
            .await;
        }

        let outlets = repo.list_outlets().await.unwrap();

        assert_eq!(outlets.len(), 4);
        assert_eq!(outlets[0].outlet, "Outlet 0");
        assert_eq!(outlets[3].outlet, "Outlet 3");
    }

    #[tokio::test]
    async fn test_list_outlets_by_file_filters_on_file_id() {
        let db = setup_test_db().await;
        let repo = OutletRepository::new(&db);

        let now = Utc::now();
        let file_a = insert_manifest(&db, "march.xlsx", now).await;
        let file_b = insert_manifest(&db, "april.xlsx", now).await;

        insert_outlet(&db, "Jayanagar", Some(file_a), now).await;
        insert_outlet(&db, "Indiranagar", Some(file_a), now - Duration::seconds(1)).await;
        insert_outlet(&db, "Koramangala", Some(file_b), now).await;

        let outlets = repo.list_outlets_by_file(Some(file_a)).await.unwrap();

        assert_eq!(outlets.len(), 2);
        assert!(outlets.iter().all(|o| o.file_id == Some(file_a)));
        assert_eq!(outlets[0].outlet, "Jayanagar");
    }

    #[tokio::test]
    async fn test_list_outlets_by_file_none_is_empty_not_error() {
        let db = setup_test_db().await;
        let repo = OutletRepository::new(&db);

        let now = Utc::now();
        insert_outlet(&db, "Jayanagar", None, now).await;

        let outlets = repo.list_outlets_by_file(None).await.unwrap();

        assert!(outlets.is_empty());
    }
}
