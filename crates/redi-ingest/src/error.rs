//! Error types for extract ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a source extract.
///
/// All of these are source-scoped: the pipeline skips the affected source
/// and carries on with the rest.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Extract file not found.
    #[error("extract not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Parsing Errors ===
    /// Failed to parse CSV.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// The configured header row is missing or blank.
    #[error("no header row found in {path}")]
    EmptyExtract { path: PathBuf },

    // === Workbook Errors ===
    /// Failed to open or read a workbook.
    #[cfg(feature = "excel")]
    #[error("failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// Named sheet does not exist in the workbook.
    #[error("sheet '{sheet}' not found in {path}")]
    SheetNotFound { path: PathBuf, sheet: String },
}

impl IngestError {
    pub(crate) fn from_csv(path: impl Into<PathBuf>, err: &csv::Error) -> Self {
        let path = path.into();
        if let csv::ErrorKind::Io(io) = err.kind()
            && io.kind() == std::io::ErrorKind::NotFound
        {
            return Self::FileNotFound { path };
        }
        Self::CsvParse {
            path,
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
