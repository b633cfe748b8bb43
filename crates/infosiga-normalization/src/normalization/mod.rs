//! Cell-level normalization functions.
//!
//! Pure functions over single values. The executor applies them column by
//! column.

pub mod brackets;
pub mod category;
pub mod color;
pub mod datetime;
pub mod indicators;

pub use brackets::{DEMOGRAPHIC_LEVELS, LEGAL_LEVELS, bracket_map};
pub use category::{CategoryMap, NOT_AVAILABLE, Recoded, UnmappedPolicy};
pub use color::normalize_color;
pub use datetime::{days_since_epoch, nanos_since_midnight, parse_date, parse_time};
pub use indicators::{IndicatorValue, parse_count, parse_flag};
