// ABOUTME: CSV export of downstream API payloads
// ABOUTME: Flattens JSON into rows and writes the result to a fixed file in the background
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # CSV Export
//!
//! Best-effort export of the `/data` payload. Failures never reach the HTTP
//! response: they are logged and published to subscribers of the exporter.

/// JSON to CSV flattening
pub mod flatten;
/// Background file writer with per-path write serialization
pub mod writer;

pub use flatten::{flatten_to_csv, CsvDocument, FlattenError, MAX_FLATTEN_DEPTH};
pub use writer::{CsvExporter, ExportError, ExportHandle, ExportSummary};
