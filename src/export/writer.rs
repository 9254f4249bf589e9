// ABOUTME: Background CSV writer that runs exports as supervised tokio tasks
// ABOUTME: Serializes writes per exporter and publishes every outcome to subscribers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::flatten::{flatten_to_csv, FlattenError};
use serde_json::Value;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Capacity of the outcome channel; slow subscribers see `Lagged`
const OUTCOME_CHANNEL_CAPACITY: usize = 16;

/// A completed write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// File that was replaced
    pub path: PathBuf,
    /// Data rows written, excluding the header
    pub rows: usize,
    /// Bytes written
    pub bytes: usize,
}

/// Why an export did not produce a file
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// Payload cannot be flattened
    #[error(transparent)]
    Flatten(#[from] FlattenError),
    /// Filesystem failure
    #[error("failed to write {path}: {message}")]
    Write {
        /// Target file
        path: PathBuf,
        /// Underlying I/O error text
        message: String,
    },
    /// The export task panicked or was cancelled
    #[error("export task did not complete: {0}")]
    Task(String),
}

/// Handle to one running export
///
/// Dropping the handle detaches the task; it still runs to completion and its
/// outcome is still logged and broadcast.
#[derive(Debug)]
pub struct ExportHandle {
    task: JoinHandle<Result<ExportSummary, ExportError>>,
}

impl ExportHandle {
    /// Wait for the export to finish
    ///
    /// # Errors
    ///
    /// Returns the export's failure, or `Task` if the task itself failed
    pub async fn outcome(self) -> Result<ExportSummary, ExportError> {
        self.task
            .await
            .map_err(|e| ExportError::Task(e.to_string()))?
    }
}

/// Writes CSV exports of API payloads to a single file
#[derive(Clone)]
pub struct CsvExporter {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
    outcomes: broadcast::Sender<Result<ExportSummary, ExportError>>,
}

impl CsvExporter {
    /// Create an exporter that overwrites `path` on every export
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let (outcomes, _) = broadcast::channel(OUTCOME_CHANNEL_CAPACITY);
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
            outcomes,
        }
    }

    /// Target file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Receive the outcome of every export started after this call
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Result<ExportSummary, ExportError>> {
        self.outcomes.subscribe()
    }

    /// Start exporting `payload` in the background
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_export(&self, payload: Value) -> ExportHandle {
        let exporter = self.clone();
        let task = tokio::spawn(async move {
            let outcome = exporter.export(&payload).await;
            match &outcome {
                Ok(summary) => info!(
                    path = %summary.path.display(),
                    rows = summary.rows,
                    bytes = summary.bytes,
                    "CSV export written"
                ),
                Err(ExportError::Flatten(reason)) => {
                    warn!(path = %exporter.path.display(), "CSV export skipped: {reason}");
                }
                Err(e) => warn!(path = %exporter.path.display(), "CSV export failed: {e}"),
            }
            // No subscribers is the normal case
            let _ = exporter.outcomes.send(outcome.clone());
            outcome
        });
        ExportHandle { task }
    }

    /// Flatten and write `payload`, replacing the file atomically
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not tabular or the file cannot be written
    pub async fn export(&self, payload: &Value) -> Result<ExportSummary, ExportError> {
        let document = flatten_to_csv(payload)?;

        let _guard = self.write_lock.lock().await;
        let staging = staging_path(&self.path);
        debug!(staging = %staging.display(), "Writing CSV export");

        tokio::fs::write(&staging, document.text.as_bytes())
            .await
            .map_err(|e| self.write_error(&e))?;
        if let Err(e) = tokio::fs::rename(&staging, &self.path).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(self.write_error(&e));
        }

        Ok(ExportSummary {
            path: self.path.clone(),
            rows: document.rows,
            bytes: document.text.len(),
        })
    }

    fn write_error(&self, error: &std::io::Error) -> ExportError {
        ExportError::Write {
            path: self.path.clone(),
            message: error.to_string(),
        }
    }
}

/// Sibling file the export is staged in before the rename
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(|| OsString::from("export"), ToOwned::to_owned);
    name.push(".tmp");
    path.with_file_name(name)
}
