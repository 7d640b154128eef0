//! Outlet entity model
//!
//! This module contains the SeaORM entity model for the outlets table, which
//! stores one outlet's financial results for one reporting month. Rows are
//! bulk-inserted by the persistence step of an upload and never mutated here.

use super::uploaded_file::Entity as UploadedFile;
use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use uuid::Uuid;

/// Outlet entity representing one outlet-month of financial results.
///
/// Every financial column is nullable: source spreadsheets routinely omit
/// fields, and the projection layer is responsible for any defaulting.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "outlets")]
pub struct Model {
    /// Unique identifier for the record (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Timestamp when the record was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp when the record was last updated
    pub updated_at: DateTimeWithTimeZone,

    /// Manifest of the upload that produced this row; NULL for orphaned rows
    pub file_id: Option<Uuid>,

    /// Outlet display name
    pub outlet: String,

    /// Outlet manager name
    pub outlet_manager: Option<String>,

    /// Reporting month as it appeared in the source sheet
    pub month: Option<String>,

    /// Direct income
    pub direct_income: Option<f64>,

    /// Total revenue
    pub total_revenue: Option<f64>,

    /// Cost of goods sold
    pub cogs: Option<f64>,

    /// Outlet operating expenses
    pub outlet_expenses: Option<f64>,

    /// EBIDTA (spelling inherited from the source sheets)
    pub ebidta: Option<f64>,

    /// Total finance cost
    pub finance_cost: Option<f64>,

    /// Finance cost component: bank charges
    pub bank_charges: Option<f64>,

    /// Finance cost component: interest on borrowings
    pub interest_on_borrowings: Option<f64>,

    /// Finance cost component: interest on vehicle loans
    pub interest_on_vehicle_loan: Option<f64>,

    /// Minimum-guarantee charge
    pub mg: Option<f64>,

    /// Profit before tax
    pub pbt: Option<f64>,

    /// Wastage
    pub wastage: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "UploadedFile",
        from = "Column::FileId",
        to = "super::uploaded_file::Column::Id"
    )]
    UploadedFile,
}

impl Related<UploadedFile> for Entity {
    fn to() -> RelationDef {
        Relation::UploadedFile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
