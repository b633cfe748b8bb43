//! Rule and result types.

use infosiga_model::{ColumnFamily, DatasetKind, QualityReport};
use polars::prelude::DataFrame;

use crate::normalization::CategoryMap;

/// Which source columns a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSelector {
    Named(&'static str),
    /// Every present member of the family, in source order.
    Family(ColumnFamily),
}

/// How one column is turned into its output form.
#[derive(Debug, Clone)]
pub enum ColumnTransform {
    /// Trimmed string, blank becomes null.
    Text,
    /// Recode through a category map; output `String`.
    Category(CategoryMap),
    /// Recode through a category map; output `Enum` with these levels.
    Ordered {
        map: CategoryMap,
        levels: &'static [&'static str],
    },
    /// `Date`, null when unparseable.
    Date,
    /// `Time`, null when unparseable.
    Time,
    /// `Float64`, null when non-numeric.
    Float,
    /// `Int64`, null when non-integral.
    Integer,
    /// `Int64` count, missing is `0`.
    Count,
    /// `Int64` 0/1 from `S`/`N`, missing is `0`.
    Flag,
    /// Vehicle colour in sentence case.
    Color,
    /// New column computed from the already-recoded output of `from`.
    Derived {
        from: &'static str,
        pairs: &'static [(&'static str, &'static str)],
    },
}

/// One step of a [`RuleSet`].
#[derive(Debug, Clone)]
pub struct ColumnRule {
    pub selector: ColumnSelector,
    pub transform: ColumnTransform,
}

impl ColumnRule {
    pub fn named(column: &'static str, transform: ColumnTransform) -> Self {
        Self {
            selector: ColumnSelector::Named(column),
            transform,
        }
    }

    pub fn family(family: ColumnFamily, transform: ColumnTransform) -> Self {
        Self {
            selector: ColumnSelector::Family(family),
            transform,
        }
    }

    pub fn category(column: &'static str, map: CategoryMap) -> Self {
        Self::named(column, ColumnTransform::Category(map))
    }
}

/// Join of incident rows to the municipality lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MunicipalityEnrichment {
    /// Code columns in preference order; the first present one is the key.
    pub code_columns: &'static [&'static str],
    /// Name column used when no code column is present.
    pub name_column: &'static str,
    pub code_output: &'static str,
    pub region_output: &'static str,
    pub name_output: &'static str,
}

/// Ordered cleaning steps for one dataset kind.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub kind: DatasetKind,
    pub rules: Vec<ColumnRule>,
    pub enrichment: Option<MunicipalityEnrichment>,
}

/// Output of cleaning one table.
#[derive(Debug, Clone)]
pub struct CleanedTable {
    pub kind: DatasetKind,
    /// Typed columns in the kind's fixed projection order.
    pub frame: DataFrame,
    pub report: QualityReport,
}

impl CleanedTable {
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn width(&self) -> usize {
        self.frame.width()
    }
}
