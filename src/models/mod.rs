//! # Data Models
//!
//! This module contains the SeaORM entity models for the two persisted
//! collections the analytics core reads and refreshes.

pub mod outlet;
pub mod uploaded_file;

pub use outlet::Entity as Outlet;
pub use uploaded_file::Entity as UploadedFile;
