//! Shared utilities for the Infosiga crates.
//!
//! This crate provides common helpers used across the workspace:
//! Polars `AnyValue` conversion and the text folding used to match
//! category values and municipality names regardless of case or accents.

pub mod polars;
pub mod text;

// Re-export commonly used functions at crate root for convenience
pub use polars::{
    any_to_f64, any_to_i64, any_to_string, any_to_string_non_empty, format_numeric, parse_f64,
    parse_i64,
};
pub use text::{digits_only, fold_diacritics, fold_key, sentence_case};
