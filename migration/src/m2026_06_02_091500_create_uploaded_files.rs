//! Migration to create the uploaded_files table.
//!
//! This migration creates the uploaded_files table which stores one manifest
//! row per uploaded source spreadsheet.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Statement;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UploadedFiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UploadedFiles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UploadedFiles::FileName).text().not_null())
                    .col(ColumnDef::new(UploadedFiles::FilePath).text().not_null())
                    .col(ColumnDef::new(UploadedFiles::FileSize).big_integer().null())
                    .col(
                        ColumnDef::new(UploadedFiles::UploadedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(UploadedFiles::Processed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(UploadedFiles::UploadedBy).text().null())
                    .col(ColumnDef::new(UploadedFiles::Metadata).json_binary().null())
                    .to_owned(),
            )
            .await?;

        // Manifest listings are always newest-first
        manager
            .get_connection()
            .execute(Statement::from_string(
                manager.get_database_backend(),
                "CREATE INDEX IF NOT EXISTS idx_uploaded_files_uploaded_at ON uploaded_files (uploaded_at DESC)".to_string(),
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_uploaded_files_uploaded_at")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(UploadedFiles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UploadedFiles {
    Table,
    Id,
    FileName,
    FilePath,
    FileSize,
    UploadedAt,
    Processed,
    UploadedBy,
    Metadata,
}
