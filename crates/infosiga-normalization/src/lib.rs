//! Infosiga SP table cleaning.
//!
//! Turns the string-typed tables produced by the loader into typed,
//! analysis-ready frames. Each dataset kind has a fixed [`RuleSet`]: category
//! recoding, date/time and numeric coercion, count and flag columns, derived
//! columns and (for incidents) municipality enrichment.
//!
//! # Example
//!
//! ```ignore
//! use infosiga_model::DatasetKind;
//! use infosiga_normalization::clean;
//! use infosiga_standards::LookupTable;
//!
//! let lookup = LookupTable::embedded()?;
//! let cleaned = clean(&raw, DatasetKind::Incidents, &lookup)?;
//! assert_eq!(cleaned.height(), raw.height());
//! ```
//!
//! Cleaning never adds or drops rows. Values that cannot be placed become
//! null and, where the column's policy says so, are listed in the
//! [`CleanedTable::report`].

mod enrichment;
mod error;
mod executor;
mod rules;
mod types;

pub mod normalization;

// Core types
pub use types::{
    CleanedTable, ColumnRule, ColumnSelector, ColumnTransform, MunicipalityEnrichment, RuleSet,
};

// Error type
pub use error::{NormalizationError, Result};

// Rule tables
pub use rules::rule_set;

// Execution
pub use executor::{clean, execute_rules};

// Recoding primitives
pub use normalization::{CategoryMap, Recoded, UnmappedPolicy};
