//! Error types for source loading.

use std::path::PathBuf;

use infosiga_model::DatasetKind;
use thiserror::Error;

/// Errors that can occur while loading source files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not readable.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the size limit.
    #[error("file {path} is {size} bytes, limit is {max_size}")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    // === Discovery Errors ===
    /// No file of the requested kind was found.
    #[error("no {kind} files found under {path}")]
    NoFilesFound { kind: DatasetKind, path: PathBuf },

    // === CSV Parsing Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV file is empty or has no header.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// A file's header differs from the first file of the same kind.
    #[error("header of {path} does not match: expected [{}], found [{}]", expected.join(", "), found.join(", "))]
    SchemaMismatch {
        path: PathBuf,
        expected: Vec<String>,
        found: Vec<String>,
    },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::NoFilesFound {
            kind: DatasetKind::Persons,
            path: PathBuf::from("/data/infosiga"),
        };
        assert_eq!(err.to_string(), "no pessoas files found under /data/infosiga");
    }

    #[test]
    fn test_schema_mismatch_lists_headers() {
        let err = IngestError::SchemaMismatch {
            path: PathBuf::from("b.csv"),
            expected: vec!["a".to_string(), "b".to_string()],
            found: vec!["a".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "header of b.csv does not match: expected [a, b], found [a]"
        );
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("test".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DataFrame { .. }));
    }
}
