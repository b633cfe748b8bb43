//! Data-quality findings raised while recoding.
//!
//! The recoder never fails a whole table over a messy value. Values it
//! cannot place are nulled and tallied here so callers can see them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::kind::DatasetKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Raw value outside a closed category map.
    UnmappedCategory,
    /// Count column holding something other than an integer.
    InvalidCount,
    /// Indicator column holding something other than `S`/`N`/missing.
    InvalidFlag,
    /// Municipality key with no entry in the lookup table.
    UnmatchedMunicipality,
}

impl IssueKind {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::UnmappedCategory => "unmapped category",
            Self::InvalidCount => "invalid count",
            Self::InvalidFlag => "invalid flag",
            Self::UnmatchedMunicipality => "unmatched municipality",
        }
    }
}

/// One distinct finding: a raw value in a column, with how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityIssue {
    pub kind: IssueKind,
    pub column: String,
    pub value: String,
    pub count: u64,
}

/// All findings for one cleaned dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    pub dataset: DatasetKind,
    pub issues: Vec<QualityIssue>,
}

impl QualityReport {
    pub fn new(dataset: DatasetKind) -> Self {
        Self {
            dataset,
            issues: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of affected cells across all issues.
    pub fn total_count(&self) -> u64 {
        self.issues.iter().map(|issue| issue.count).sum()
    }

    /// Number of affected cells for one issue kind.
    pub fn count_for(&self, kind: IssueKind) -> u64 {
        self.issues
            .iter()
            .filter(|issue| issue.kind == kind)
            .map(|issue| issue.count)
            .sum()
    }

    pub fn issues_for_column<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a QualityIssue> {
        self.issues.iter().filter(move |issue| issue.column == column)
    }
}

/// Accumulates findings while a table is processed.
///
/// Identical `(kind, column, value)` triples collapse into one issue with a
/// count, so a bad value repeated on a million rows is one entry.
#[derive(Debug, Default)]
pub struct IssueTally {
    counts: BTreeMap<(IssueKind, String, String), u64>,
}

impl IssueTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: IssueKind, column: &str, value: &str) {
        *self
            .counts
            .entry((kind, column.to_string(), value.to_string()))
            .or_insert(0) += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn into_report(self, dataset: DatasetKind) -> QualityReport {
        let issues = self
            .counts
            .into_iter()
            .map(|((kind, column, value), count)| QualityIssue {
                kind,
                column,
                value,
                count,
            })
            .collect();
        QualityReport { dataset, issues }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_collapses_repeated_values() {
        let mut tally = IssueTally::new();
        tally.record(IssueKind::UnmappedCategory, "sexo", "X");
        tally.record(IssueKind::UnmappedCategory, "sexo", "X");
        tally.record(IssueKind::InvalidFlag, "tp_sinistro_choque", "?");

        let report = tally.into_report(DatasetKind::Persons);
        assert_eq!(report.issues.len(), 2);
        assert_eq!(report.total_count(), 3);
        assert_eq!(report.count_for(IssueKind::UnmappedCategory), 2);
        assert_eq!(report.issues_for_column("sexo").count(), 1);
    }

    #[test]
    fn empty_report_is_clean() {
        let report = IssueTally::new().into_report(DatasetKind::Vehicles);
        assert!(report.is_clean());
        assert_eq!(report.total_count(), 0);
    }
}
