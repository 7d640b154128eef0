//! Migration to create the outlets table.
//!
//! This migration creates the outlets table which stores one row per outlet
//! per reporting month, bulk-inserted by the persistence step of an upload.
//! The file_id reference is nullable: rows can outlive their source manifest.

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
                    .table(Outlets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Outlets::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Outlets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Outlets::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Outlets::FileId).uuid().null())
                    .col(ColumnDef::new(Outlets::Outlet).text().not_null())
                    .col(ColumnDef::new(Outlets::OutletManager).text().null())
                    .col(ColumnDef::new(Outlets::Month).text().null())
                    .col(ColumnDef::new(Outlets::DirectIncome).double().null())
                    .col(ColumnDef::new(Outlets::TotalRevenue).double().null())
                    .col(ColumnDef::new(Outlets::Cogs).double().null())
                    .col(ColumnDef::new(Outlets::OutletExpenses).double().null())
                    .col(ColumnDef::new(Outlets::Ebidta).double().null())
                    .col(ColumnDef::new(Outlets::FinanceCost).double().null())
                    .col(ColumnDef::new(Outlets::BankCharges).double().null())
                    .col(ColumnDef::new(Outlets::InterestOnBorrowings).double().null())
                    .col(ColumnDef::new(Outlets::InterestOnVehicleLoan).double().null())
                    .col(ColumnDef::new(Outlets::Mg).double().null())
                    .col(ColumnDef::new(Outlets::Pbt).double().null())
                    .col(ColumnDef::new(Outlets::Wastage).double().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_outlets_file_id")
                            .from(Outlets::Table, Outlets::FileId)
                            .to(UploadedFiles::Table, UploadedFiles::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Dashboard listings read newest-first
        manager
            .get_connection()
            .execute(Statement::from_string(
                manager.get_database_backend(),
                "CREATE INDEX IF NOT EXISTS idx_outlets_created_at ON outlets (created_at DESC)"
                    .to_string(),
            ))
            .await?;

        // Per-file drill-down filters on file_id with the same ordering
        manager
            .get_connection()
            .execute(Statement::from_string(
                manager.get_database_backend(),
                "CREATE INDEX IF NOT EXISTS idx_outlets_file_created ON outlets (file_id, created_at DESC)".to_string(),
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_outlets_created_at").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_outlets_file_created").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Outlets::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Outlets {
    Table,
    Id,
    CreatedAt,
    UpdatedAt,
    FileId,
    Outlet,
    OutletManager,
    Month,
    DirectIncome,
    TotalRevenue,
    Cogs,
    OutletExpenses,
    Ebidta,
    FinanceCost,
    BankCharges,
    InterestOnBorrowings,
    InterestOnVehicleLoan,
    Mg,
    Pbt,
    Wastage,
}

#[derive(DeriveIden)]
enum UploadedFiles {
    Table,
    Id,
}
