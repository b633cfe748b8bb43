//! Error types for table cleaning.

use infosiga_model::DatasetKind;
use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormalizationError {
    /// Columns required by the kind's rules are absent from the input.
    #[error("{kind} table is missing required columns: {}", missing.join(", "))]
    SchemaMismatch {
        kind: DatasetKind,
        missing: Vec<String>,
    },

    /// Cleaning produced a different number of rows than it was given.
    #[error("cleaning {kind} changed the row count from {input} to {output}")]
    RowCountChanged {
        kind: DatasetKind,
        input: usize,
        output: usize,
    },

    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, NormalizationError>;
