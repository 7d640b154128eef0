//! Shared fixtures for unit tests: an in-memory store with real migrations
//! and builders for the two entities.

use chrono::{DateTime, Utc};
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::db::init_pool;
use crate::models::{outlet, uploaded_file};

/// Open a fresh `sqlite::memory:` store and run all migrations against it.
pub async fn setup_test_db() -> DatabaseConnection {
    let config = AppConfig {
        database_url: "sqlite::memory:".to_string(),
        profile: "test".to_string(),
        ..Default::default()
    };

    let db = init_pool(&config).await.expect("Failed to init test DB");
    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

/// Insert an upload manifest and return its id.
pub async fn insert_manifest(
    db: &DatabaseConnection,
    file_name: &str,
    uploaded_at: DateTime<Utc>,
) -> Uuid {
    let id = Uuid::new_v4();
    let manifest = uploaded_file::ActiveModel {
        id: Set(id),
        file_name: Set(file_name.to_string()),
        file_path: Set(format!("uploads/{}", file_name)),
        file_size: Set(None),
        uploaded_at: Set(uploaded_at.into()),
        processed: Set(true),
        uploaded_by: Set(None),
        metadata: Set(None),
    };
    manifest.insert(db).await.expect("insert manifest");
    id
}

/// Insert an outlet record with all financial fields absent and return its id.
pub async fn insert_outlet(
    db: &DatabaseConnection,
    name: &str,
    file_id: Option<Uuid>,
    created_at: DateTime<Utc>,
) -> Uuid {
    let id = Uuid::new_v4();
    let record = outlet::ActiveModel {
        id: Set(id),
        created_at: Set(created_at.into()),
        updated_at: Set(created_at.into()),
        file_id: Set(file_id),
        outlet: Set(name.to_string()),
        ..Default::default()
    };
    record.insert(db).await.expect("insert outlet");
    id
}

/// Build an in-memory outlet model (no store involved) for projection tests.
pub fn outlet_fixture(name: &str, file_id: Option<Uuid>) -> outlet::Model {
    let now = Utc::now();
    outlet::Model {
        id: Uuid::new_v4(),
        created_at: now.into(),
        updated_at: now.into(),
        file_id,
        outlet: name.to_string(),
        outlet_manager: None,
        month: None,
        direct_income: None,
        total_revenue: None,
        cogs: None,
        outlet_expenses: None,
        ebidta: None,
        finance_cost: None,
        bank_charges: None,
        interest_on_borrowings: None,
        interest_on_vehicle_loan: None,
        mg: None,
        pbt: None,
        wastage: None,
    }
}
