//! UploadedFile entity model
//!
//! This module contains the SeaORM entity model for the uploaded_files table,
//! which stores one manifest row per uploaded source spreadsheet. A manifest
//! can exist without outlet rows when persistence failed after parsing.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// UploadedFile entity describing one uploaded source file.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "uploaded_files")]
pub struct Model {
    /// Unique identifier for the manifest (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Display name of the uploaded file
    pub file_name: String,

    /// Storage path of the uploaded file
    pub file_path: String,

    /// Size of the uploaded file in bytes, when known
    pub file_size: Option<i64>,

    /// Timestamp when the file was uploaded
    pub uploaded_at: DateTimeWithTimeZone,

    /// Whether the file's rows were persisted successfully
    pub processed: bool,

    /// Identity of the uploader, when known
    pub uploaded_by: Option<String>,

    /// Free-form metadata attached by the processing backend
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub metadata: Option<JsonValue>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::outlet::Entity")]
    Outlet,
}

impl Related<super::outlet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Outlet.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
