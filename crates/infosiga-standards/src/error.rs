//! Error types for reference data loading.

use thiserror::Error;

/// Errors raised while loading or indexing reference data.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StandardsError {
    /// Failed to read or parse a reference CSV.
    #[error("failed to parse reference file {file}: {message}")]
    CsvParse { file: String, message: String },

    /// Invalid value in a reference CSV field.
    #[error("invalid {field} value '{value}' in {file}")]
    InvalidValue {
        field: &'static str,
        value: String,
        file: String,
    },

    /// Two lookup entries share a join key; joining would duplicate rows.
    #[error("lookup key '{key}' matches more than one municipality")]
    JoinFanOut { key: String },

    /// The registry had no municipality for the requested state.
    #[error("reference registry has no municipalities for state {state}")]
    EmptyRegistry { state: String },
}

/// Result type for reference data operations.
pub type Result<T> = std::result::Result<T, StandardsError>;
