//! Categorical recoding.
//!
//! One [`CategoryMap`] per categorical column maps the raw spellings seen in
//! the source to a canonical label. Keys are compared after [`fold_key`], so
//! `SINISTRO NÃO FATAL`, `sinistro nao fatal` and `SINISTRO  NAO FATAL` all
//! hit the same entry.

use std::collections::HashMap;

use infosiga_common::fold_key;

/// Source token meaning "not available"; always recodes to null.
pub const NOT_AVAILABLE: &str = "NAO DISPONIVEL";

/// What happens to a raw value the map does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnmappedPolicy {
    /// Keep the raw value, trimmed.
    PassThrough,
    /// Null, without reporting.
    Absent,
    /// Null, reported as a data-quality issue.
    Flag,
}

/// Result of recoding one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recoded {
    /// Blank cell or the not-available sentinel.
    Missing,
    /// Canonical label, or the raw value under [`UnmappedPolicy::PassThrough`].
    Value(String),
    /// Unknown value under [`UnmappedPolicy::Flag`].
    Unmapped,
}

impl Recoded {
    pub fn into_option(self) -> Option<String> {
        match self {
            Self::Value(value) => Some(value),
            Self::Missing | Self::Unmapped => None,
        }
    }
}

/// Mapping from folded raw spellings to canonical labels.
#[derive(Debug, Clone)]
pub struct CategoryMap {
    entries: HashMap<String, &'static str>,
    policy: UnmappedPolicy,
}

impl CategoryMap {
    /// Builds a map from `(raw, canonical)` pairs.
    ///
    /// Each canonical label is also registered as its own key, so recoding
    /// an already-clean value returns it unchanged.
    pub fn new(pairs: &[(&str, &'static str)], policy: UnmappedPolicy) -> Self {
        let mut entries = HashMap::with_capacity(pairs.len() * 2);
        for (raw, canonical) in pairs {
            entries.insert(fold_key(raw), *canonical);
            entries.entry(fold_key(canonical)).or_insert(*canonical);
        }
        Self { entries, policy }
    }

    /// Adds alternative spellings for a canonical label.
    pub fn with_aliases(mut self, canonical: &'static str, aliases: &[&str]) -> Self {
        for alias in aliases {
            self.entries.insert(fold_key(alias), canonical);
        }
        self
    }

    pub const fn policy(&self) -> UnmappedPolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonical label for `raw`, ignoring the policy.
    pub fn lookup(&self, raw: &str) -> Option<&'static str> {
        self.entries.get(&fold_key(raw)).copied()
    }

    /// Recodes one cell under this map's policy.
    pub fn recode(&self, raw: Option<&str>) -> Recoded {
        let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
            return Recoded::Missing;
        };
        let key = fold_key(raw);
        if key == NOT_AVAILABLE {
            return Recoded::Missing;
        }
        if let Some(canonical) = self.entries.get(&key) {
            return Recoded::Value((*canonical).to_string());
        }
        match self.policy {
            UnmappedPolicy::PassThrough => Recoded::Value(raw.to_string()),
            UnmappedPolicy::Absent => Recoded::Missing,
            UnmappedPolicy::Flag => Recoded::Unmapped,
        }
    }
}
