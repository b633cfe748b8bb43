//! Age brackets.
//!
//! Brackets are ordered categories. Vintages spell them differently
//! (`00 a 04`, `0-4`, `90 e +`, `90 ou mais`), so each level gets a set of
//! generated aliases and the column is emitted as a Polars `Enum` whose
//! physical order is youngest to oldest.

use super::category::{CategoryMap, UnmappedPolicy};

/// Demographic (five-year) brackets, youngest first.
pub const DEMOGRAPHIC_LEVELS: &[&str] = &[
    "00 a 04", "05 a 09", "10 a 14", "15 a 19", "20 a 24", "25 a 29", "30 a 34", "35 a 39",
    "40 a 44", "45 a 49", "50 a 54", "55 a 59", "60 a 64", "65 a 69", "70 a 74", "75 a 79",
    "80 a 84", "85 a 89", "90+",
];

/// Legal brackets (minors, then five-year bands from 25), youngest first.
pub const LEGAL_LEVELS: &[&str] = &[
    "00 a 17", "18 a 24", "25 a 29", "30 a 34", "35 a 39", "40 a 44", "45 a 49", "50 a 54",
    "55 a 59", "60 a 64", "65 a 69", "70 a 74", "75 a 79", "80+",
];

const OPEN_ENDED_SUFFIXES: &[&str] = &["e +", "e mais", "ou mais", "+", "mais", "anos ou mais"];

/// Builds the recoding map for a list of bracket levels.
///
/// Closed levels (`AA a BB`) accept unpadded and dash-separated spellings.
/// The open-ended level (`NN+`) accepts the Portuguese "and over" wordings.
pub fn bracket_map(levels: &'static [&'static str]) -> CategoryMap {
    let pairs: Vec<(&str, &'static str)> = levels.iter().map(|level| (*level, *level)).collect();
    let mut map = CategoryMap::new(&pairs, UnmappedPolicy::Flag);

    for level in levels {
        let aliases = level_aliases(level);
        let refs: Vec<&str> = aliases.iter().map(String::as_str).collect();
        map = map.with_aliases(*level, &refs);
    }
    map
}

fn level_aliases(level: &str) -> Vec<String> {
    if let Some(lower) = level.strip_suffix('+') {
        let Ok(lower) = lower.trim().parse::<u32>() else {
            return Vec::new();
        };
        return OPEN_ENDED_SUFFIXES
            .iter()
            .map(|suffix| format!("{lower} {suffix}"))
            .chain(std::iter::once(format!("{lower} anos e mais")))
            .collect();
    }

    let mut bounds = level.split(" a ").map(|part| part.trim().parse::<u32>());
    let (Some(Ok(low)), Some(Ok(high))) = (bounds.next(), bounds.next()) else {
        return Vec::new();
    };
    vec![
        format!("{low} a {high}"),
        format!("{low}-{high}"),
        format!("{low:02}-{high:02}"),
        format!("{low} a {high} anos"),
        format!("{low:02} a {high:02} anos"),
    ]
}
