//! # Upload Pipeline
//!
//! Orchestrates the two-phase upload: remote parsing of a spreadsheet file,
//! then durable storage of the parsed rows. Owns the progress/status state
//! machine, invalidates the query cache on success, and reports the outcome
//! through the notification side channel.
//!
//! Concurrency contract: at most one upload is in flight per [`Uploader`].
//! A second `upload()` call while one is running is rejected: it emits a
//! failure notification, returns `None`, and leaves the in-flight upload's
//! state untouched.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use metrics::counter;
use tokio::sync::watch;
use tracing::{error, info, instrument, warn};

use crate::backend::{ParsedRow, ProcessingBackend};
use crate::cache::{QueryCache, keys};
use crate::error::UploadError;
use crate::notify::{Notification, Notifier};

/// Observable status of the upload pipeline.
///
/// Progress moves through coarse stage checkpoints (0, 30, 60, 100), not
/// measured transfer bytes. The machine always returns to `Idle` when an
/// accepted upload finishes, whatever the outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadState {
    Idle,
    Uploading { progress: u8 },
    Succeeded { rows_inserted: u64 },
    Failed { message: String },
}

impl UploadState {
    /// Current checkpoint progress, 0 outside of an active upload.
    pub fn progress(&self) -> u8 {
        match self {
            UploadState::Uploading { progress } => *progress,
            UploadState::Succeeded { .. } => 100,
            _ => 0,
        }
    }
}

/// Drives the two-phase upload pipeline.
pub struct Uploader {
    backend: Arc<dyn ProcessingBackend>,
    cache: Arc<QueryCache>,
    notifier: Arc<dyn Notifier>,
    state: watch::Sender<UploadState>,
    in_flight: AtomicBool,
}

impl Uploader {
    /// Create an uploader over the given collaborators.
    pub fn new(
        backend: Arc<dyn ProcessingBackend>,
        cache: Arc<QueryCache>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (state, _) = watch::channel(UploadState::Idle);
        Self {
            backend,
            cache,
            notifier,
            state,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Subscribe to state machine transitions.
    pub fn state(&self) -> watch::Receiver<UploadState> {
        self.state.subscribe()
    }

    /// Run the full pipeline for one file.
    ///
    /// Returns the parsed rows on success and `None` on any failure; failures
    /// are normalized to a user-facing notification and never propagate as
    /// errors. Every exit path of an accepted upload resets the machine to
    /// `Idle` with progress 0.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Option<Vec<ParsedRow>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!(file_name, "rejecting upload: another upload is in flight");
            self.notifier.notify(Notification::error(
                "Upload failed",
                Some("Another upload is already in progress".to_string()),
            ));
            return None;
        }

        // Terminal reset: runs on success, failure, and unwind alike.
        let _reset = scopeguard::guard((), |_| {
            self.state.send_replace(UploadState::Idle);
            self.in_flight.store(false, Ordering::Release);
        });

        self.state
            .send_replace(UploadState::Uploading { progress: 0 });

        match self.run_pipeline(file_name, bytes).await {
            Ok((rows, rows_inserted)) => {
                self.cache.invalidate(keys::OUTLETS);
                self.cache.invalidate(keys::UPLOADED_FILES);

                counter!("uploads_succeeded_total").increment(1);
                info!(file_name, rows_inserted, "upload complete");

                self.state
                    .send_replace(UploadState::Succeeded { rows_inserted });
                self.notifier.notify(Notification::success(
                    "File uploaded successfully!",
                    Some(format!(
                        "{} outlet records saved to database",
                        rows_inserted
                    )),
                ));

                Some(rows)
            }
            Err(err) => {
                counter!("uploads_failed_total").increment(1);
                let message = err.user_message();

                // A persist-stage failure leaves a parsed file with no stored
                // rows; there is no rollback, so it is surfaced distinctly.
                let title = if err.is_partial() {
                    error!(file_name, %err, "upload failed after parsing; rows were not stored");
                    "Upload failed after parsing"
                } else {
                    error!(file_name, %err, "upload failed");
                    "Upload failed"
                };

                self.state.send_replace(UploadState::Failed {
                    message: message.clone(),
                });
                self.notifier
                    .notify(Notification::error(title, Some(message)));

                None
            }
        }
    }

    async fn run_pipeline(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<(Vec<ParsedRow>, u64), UploadError> {
        let rows = self.backend.parse_file(file_name, bytes).await?;
        self.set_progress(30);

        let rows_inserted = self.backend.persist_outlets(&rows, file_name).await?;
        self.set_progress(60);
        self.set_progress(100);

        Ok((rows, rows_inserted))
    }

    fn set_progress(&self, progress: u8) {
        self.state
            .send_replace(UploadState::Uploading { progress });
    }
}
