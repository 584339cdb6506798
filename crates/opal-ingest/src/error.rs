//! Error types for input loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading an input file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("Input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Table Errors ===
    /// Failed to parse a columnar table with Polars.
    #[error("failed to read table {path}: {message}")]
    TableRead { path: PathBuf, message: String },

    // === Descriptor Errors ===
    /// Descriptor is not valid JSON.
    #[error("Invalid JSON format in input file {path}: {message}")]
    InvalidJson { path: PathBuf, message: String },

    /// Descriptor has no top-level `entries` key.
    #[error("JSON missing top-level 'entries' key")]
    MissingEntries,

    /// `entries` is not a non-empty list.
    #[error("'entries' must be a non-empty list")]
    EmptyEntries,

    /// First entry is not an object.
    #[error("Entry must be a dictionary")]
    EntryNotObject,

    /// A required section is absent from the first entry.
    #[error("Missing required section '{section}' in entry")]
    MissingSection { section: &'static str },

    /// The entry has the required sections but an unusable shape.
    #[error("Invalid entries structure: {message}")]
    InvalidStructure { message: String },

    // === Dictionary Errors ===
    /// Failed to open a dictionary workbook.
    #[error("failed to open workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// Sheet not present in the dictionary workbook.
    #[error("sheet '{sheet}' not found in {path}")]
    MissingSheet { sheet: String, path: PathBuf },

    /// Required column not found in a dictionary sheet.
    #[error("required column '{column}' not found in sheet '{sheet}' of {path}")]
    MissingColumn {
        column: String,
        sheet: String,
        path: PathBuf,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
