//! # Repositories
//!
//! Read-only data access for the two persisted collections. Every method is
//! idempotent and side-effect-free; store errors propagate as
//! [`crate::error::RepositoryError`] without retries.

pub mod outlet;
pub mod uploaded_file;

pub use outlet::OutletRepository;
pub use uploaded_file::UploadedFileRepository;
