//! Database migrations for the outlet analytics store.
//!
//! This module contains all database migrations using SeaORM Migration.

pub use sea_orm_migration::prelude::*;

mod m2026_06_02_091500_create_uploaded_files;
mod m2026_06_02_091600_create_outlets;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2026_06_02_091500_create_uploaded_files::Migration),
            Box::new(m2026_06_02_091600_create_outlets::Migration),
        ]
    }
}
