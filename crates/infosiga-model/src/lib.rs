//! Data model for the Infosiga SP cleaning pipeline.
//!
//! - [`DatasetKind`]: the three source datasets and their file prefixes
//! - [`columns`]: source column names, column families and the fixed output projections
//! - [`QualityReport`]: data-quality findings raised while recoding

pub mod columns;
pub mod error;
pub mod kind;
pub mod quality;

pub use columns::{ColumnFamily, ProjectionItem, resolve_projection};
pub use error::{ModelError, Result};
pub use kind::DatasetKind;
pub use quality::{IssueKind, IssueTally, QualityIssue, QualityReport};
