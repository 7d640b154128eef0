//! # View Projections
//!
//! Pure, total transformations of the persisted outlet collection into the
//! row shapes the analytical views consume. Nothing here touches the store:
//! callers pass the records they already fetched and get derived rows back.
//!
//! [`FlatRow`] carries the full legacy-alias contract. Several consuming
//! views were written against different historical field-naming conventions
//! (point-of-sale exports, store-level reports, the current outlet schema),
//! and this module is the single place that reconciles them. The mapping is
//! recorded in [`FIELD_ALIASES`] so the reconciliation list stays auditable.

use serde::Serialize;
use uuid::Uuid;

use crate::models::outlet;

/// Canonical field name to the legacy aliases every [`FlatRow`] also carries.
///
/// `TOTAL REVENUE` aliases default null to zero; the canonical field keeps
/// its null so exports can distinguish "missing" from "zero".
pub const FIELD_ALIASES: &[(&str, &[&str])] = &[
    ("Outlet", &["Branch", "Store Name"]),
    ("Outlet Manager", &["Cashier", "Cluster Manager"]),
    ("TOTAL REVENUE", &["Total Sales", "Total Amount (\u{20b9})"]),
];

/// Sentinel product name: rows are pre-aggregated at outlet level.
const SUMMARY_PRODUCT_NAME: &str = "Outlet Summary";

/// Sentinel category matching [`SUMMARY_PRODUCT_NAME`].
const SUMMARY_CATEGORY: &str = "Financial Summary";

/// Key identifying the upload a record came from, embedding its `file_id`.
///
/// Orphaned records (no `file_id`) render the literal `null`, which is the
/// sentinel the historical consumers already expect.
pub fn file_key(file_id: Option<&Uuid>) -> String {
    match file_id {
        Some(id) => format!("File ID: {}", id),
        None => "File ID: null".to_string(),
    }
}

/// Denormalized analytics row: canonical fields plus every legacy alias.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatRow {
    #[serde(rename = "Outlet")]
    pub outlet: String,
    #[serde(rename = "Outlet Manager")]
    pub outlet_manager: Option<String>,
    #[serde(rename = "Month")]
    pub month: Option<String>,
    #[serde(rename = "Direct Income")]
    pub direct_income: Option<f64>,
    #[serde(rename = "TOTAL REVENUE")]
    pub total_revenue: Option<f64>,
    #[serde(rename = "COGS")]
    pub cogs: Option<f64>,
    #[serde(rename = "Outlet Expenses")]
    pub outlet_expenses: Option<f64>,
    #[serde(rename = "EBIDTA")]
    pub ebidta: Option<f64>,
    #[serde(rename = "Finance Cost")]
    pub finance_cost: Option<f64>,
    #[serde(rename = "01-Bank Charges")]
    pub bank_charges: Option<f64>,
    #[serde(rename = "02-Interest on Borrowings")]
    pub interest_on_borrowings: Option<f64>,
    #[serde(rename = "03-Interest on Vehicle Loan")]
    pub interest_on_vehicle_loan: Option<f64>,
    #[serde(rename = "04-MG")]
    pub mg: Option<f64>,
    #[serde(rename = "PBT")]
    pub pbt: Option<f64>,
    #[serde(rename = "WASTAGE")]
    pub wastage: Option<f64>,
    // Compatibility aliases for the analytics views
    #[serde(rename = "Product Name")]
    pub product_name: &'static str,
    #[serde(rename = "Category")]
    pub category: &'static str,
    #[serde(rename = "Branch")]
    pub branch: String,
    #[serde(rename = "Cashier")]
    pub cashier: Option<String>,
    #[serde(rename = "Total Amount (\u{20b9})")]
    pub total_amount: f64,
    #[serde(rename = "Cluster Manager")]
    pub cluster_manager: Option<String>,
    #[serde(rename = "Store Name")]
    pub store_name: String,
    #[serde(rename = "Total Sales")]
    pub total_sales: f64,
    #[serde(rename = "Upload Filename")]
    pub upload_filename: String,
}

/// Subset row for per-file filtering and drill-down views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrowRow {
    #[serde(rename = "Outlet")]
    pub outlet: String,
    #[serde(rename = "Outlet Manager")]
    pub outlet_manager: Option<String>,
    #[serde(rename = "Month")]
    pub month: Option<String>,
    #[serde(rename = "TOTAL REVENUE")]
    pub total_revenue: Option<f64>,
    #[serde(rename = "PBT")]
    pub pbt: Option<f64>,
    #[serde(rename = "EBIDTA")]
    pub ebidta: Option<f64>,
    #[serde(rename = "Finance Cost")]
    pub finance_cost: Option<f64>,
    #[serde(rename = "Direct Income")]
    pub direct_income: Option<f64>,
    #[serde(rename = "COGS")]
    pub cogs: Option<f64>,
}

/// Rows of one upload, keyed by [`file_key`].
#[derive(Debug, Clone, PartialEq)]
pub struct FileGroup {
    pub key: String,
    pub rows: Vec<NarrowRow>,
}

/// Project each record into one [`FlatRow`], preserving input order.
pub fn project_flat(records: &[outlet::Model]) -> Vec<FlatRow> {
    records.iter().map(flat_row).collect()
}

fn flat_row(record: &outlet::Model) -> FlatRow {
    FlatRow {
        outlet: record.outlet.clone(),
        outlet_manager: record.outlet_manager.clone(),
        month: record.month.clone(),
        direct_income: record.direct_income,
        total_revenue: record.total_revenue,
        cogs: record.cogs,
        outlet_expenses: record.outlet_expenses,
        ebidta: record.ebidta,
        finance_cost: record.finance_cost,
        bank_charges: record.bank_charges,
        interest_on_borrowings: record.interest_on_borrowings,
        interest_on_vehicle_loan: record.interest_on_vehicle_loan,
        mg: record.mg,
        pbt: record.pbt,
        wastage: record.wastage,
        product_name: SUMMARY_PRODUCT_NAME,
        category: SUMMARY_CATEGORY,
        branch: record.outlet.clone(),
        cashier: record.outlet_manager.clone(),
        total_amount: record.total_revenue.unwrap_or(0.0),
        cluster_manager: record.outlet_manager.clone(),
        store_name: record.outlet.clone(),
        total_sales: record.total_revenue.unwrap_or(0.0),
        upload_filename: file_key(record.file_id.as_ref()),
    }
}

/// Group records by originating upload.
///
/// Outer order follows the first occurrence of each file key while scanning
/// `records`; rows within a group keep the input order.
pub fn project_by_file(records: &[outlet::Model]) -> Vec<FileGroup> {
    let mut groups: Vec<FileGroup> = Vec::new();
    let mut index: std::collections::HashMap<String, usize> = std::collections::HashMap::new();

    for record in records {
        let key = file_key(record.file_id.as_ref());
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            groups.push(FileGroup {
                key,
                rows: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].rows.push(narrow_row(record));
    }

    groups
}

fn narrow_row(record: &outlet::Model) -> NarrowRow {
    NarrowRow {
        outlet: record.outlet.clone(),
        outlet_manager: record.outlet_manager.clone(),
        month: record.month.clone(),
        total_revenue: record.total_revenue,
        pbt: record.pbt,
        ebidta: record.ebidta,
        finance_cost: record.finance_cost,
        direct_income: record.direct_income,
        cogs: record.cogs,
    }
}
