//! # Error Handling
//!
//! This module provides the error taxonomy for the analytics core: read-side
//! store failures propagate untouched, while upload-pipeline failures are
//! normalized to a human-readable message at the orchestrator boundary and
//! never escape `upload()` as errors.

use thiserror::Error;

/// Errors raised by the read-only record store.
///
/// The store performs no retries and never swallows a failure; callers decide
/// how to render the error state.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// The two remote phases of an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStage {
    /// Remote parsing of the raw spreadsheet bytes
    Parse,
    /// Durable storage of the parsed rows
    Persist,
}

impl UploadStage {
    fn describe(self) -> &'static str {
        match self {
            UploadStage::Parse => "file processing",
            UploadStage::Persist => "database upload",
        }
    }
}

/// Errors raised by the upload pipeline's remote collaborators.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The collaborator could not be reached or the transfer broke.
    #[error("{} failed: {source}", .stage.describe())]
    Transport {
        stage: UploadStage,
        #[source]
        source: reqwest::Error,
    },

    /// The collaborator was reachable but refused the request, either with a
    /// non-success HTTP status or an explicit `success: false` payload.
    #[error("{message}")]
    Rejected { stage: UploadStage, message: String },
}

impl UploadError {
    /// Stage at which the pipeline failed.
    pub fn stage(&self) -> UploadStage {
        match self {
            UploadError::Transport { stage, .. } | UploadError::Rejected { stage, .. } => *stage,
        }
    }

    /// True when parsing succeeded but persistence did not. The remote
    /// manifest may exist without corresponding outlet rows; there is no
    /// rollback, so this terminal state is surfaced distinctly.
    pub fn is_partial(&self) -> bool {
        self.stage() == UploadStage::Persist
    }

    /// Message shown to the user in the failure notification.
    pub fn user_message(&self) -> String {
        match self {
            UploadError::Transport { .. } => self.to_string(),
            UploadError::Rejected { message, .. } => message.clone(),
        }
    }
}
