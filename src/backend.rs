//! # Processing Backend
//!
//! Remote collaborators of the upload pipeline, behind one trait so the
//! orchestrator never sees transport details. The production implementation
//! talks to the spreadsheet processing service over HTTP:
//!
//! - `POST /process-file`: multipart body with the raw file under `file`;
//!   replies `{"success": true, "data": [...]}` with one JSON object per
//!   parsed row.
//! - `POST /upload-to-supabase`: JSON body `{"outlets": [...], "filename"}`;
//!   replies `{"success": true, "outlets_inserted": n}`.
//!
//! Parsed rows stay opaque [`serde_json::Value`] objects: this core forwards
//! them verbatim and never inspects their shape.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::time::Duration;
use url::Url;

use crate::config::AppConfig;
use crate::error::{UploadError, UploadStage};

/// One row as returned by the parse collaborator.
pub type ParsedRow = JsonValue;

/// Remote parse + persist collaborators of the upload pipeline.
#[async_trait]
pub trait ProcessingBackend: Send + Sync {
    /// Parse the raw spreadsheet bytes into structured rows.
    async fn parse_file(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Vec<ParsedRow>, UploadError>;

    /// Durably store the parsed rows, returning the inserted-row count the
    /// collaborator claims.
    async fn persist_outlets(
        &self,
        rows: &[ParsedRow],
        file_name: &str,
    ) -> Result<u64, UploadError>;
}

#[derive(Debug, Deserialize)]
struct ParseResponse {
    success: bool,
    #[serde(default)]
    data: Option<Vec<ParsedRow>>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PersistResponse {
    success: bool,
    #[serde(default)]
    outlets_inserted: Option<u64>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP implementation of [`ProcessingBackend`].
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpBackend {
    /// Build the backend client from configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let base_url = config.backend_url()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upload_request_timeout_secs))
            .build()
            .context("failed to build HTTP client for the processing backend")?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(path);
        url
    }

    fn rejected(stage: UploadStage, error: Option<String>, fallback: &str) -> UploadError {
        UploadError::Rejected {
            stage,
            message: error.unwrap_or_else(|| fallback.to_string()),
        }
    }
}

#[async_trait]
impl ProcessingBackend for HttpBackend {
    async fn parse_file(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Vec<ParsedRow>, UploadError> {
        let stage = UploadStage::Parse;
        let part = multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.endpoint("/process-file"))
            .multipart(form)
            .send()
            .await
            .map_err(|source| UploadError::Transport { stage, source })?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::rejected(
                stage,
                None,
                &format!("File processing failed: {}", status),
            ));
        }

        let payload: ParseResponse = response
            .json()
            .await
            .map_err(|source| UploadError::Transport { stage, source })?;

        if !payload.success {
            return Err(Self::rejected(stage, payload.error, "File processing failed"));
        }

        Ok(payload.data.unwrap_or_default())
    }

    async fn persist_outlets(
        &self,
        rows: &[ParsedRow],
        file_name: &str,
    ) -> Result<u64, UploadError> {
        let stage = UploadStage::Persist;
        let body = serde_json::json!({
            "outlets": rows,
            "filename": file_name,
        });

        let response = self
            .client
            .post(self.endpoint("/upload-to-supabase"))
            .json(&body)
            .send()
            .await
            .map_err(|source| UploadError::Transport { stage, source })?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::rejected(
                stage,
                None,
                &format!("Database upload failed: {}", status),
            ));
        }

        let payload: PersistResponse = response
            .json()
            .await
            .map_err(|source| UploadError::Transport { stage, source })?;

        if !payload.success {
            return Err(Self::rejected(stage, payload.error, "Database upload failed"));
        }

        Ok(payload.outlets_inserted.unwrap_or(0))
    }
}
