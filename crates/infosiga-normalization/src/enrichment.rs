//! Municipality enrichment of incident rows.
//!
//! A left join against the [`LookupTable`], done row by row. The lookup
//! guarantees one entry per key, so every input row yields exactly one
//! output row.

use std::collections::BTreeSet;

use infosiga_common::any_to_string_non_empty;
use infosiga_model::{IssueKind, IssueTally};
use infosiga_standards::{LookupTable, MunicipalityEntry};
use polars::prelude::*;

use crate::error::Result;
use crate::types::MunicipalityEnrichment;

/// Returns the source column the join will key on, if any is present.
pub(crate) fn key_column<'a>(
    enrichment: &MunicipalityEnrichment,
    source_columns: &[&'a str],
) -> Option<&'a str> {
    enrichment
        .code_columns
        .iter()
        .chain(std::iter::once(&enrichment.name_column))
        .find_map(|wanted| source_columns.iter().copied().find(|name| name == wanted))
}

/// Builds the code, region and canonical name columns.
///
/// Rows with a code use the code. A blank or unknown code falls back to the
/// name. Unmatched rows get null code and region and keep their source name,
/// and are reported under the code when they had one.
pub(crate) fn enrich_municipality(
    table: &DataFrame,
    enrichment: &MunicipalityEnrichment,
    lookup: &LookupTable,
    tally: &mut IssueTally,
) -> Result<Vec<Column>> {
    let row_count = table.height();
    let code_column = enrichment
        .code_columns
        .iter()
        .find_map(|name| table.column(name).ok().map(|column| (*name, column)));
    let name_column = table.column(enrichment.name_column).ok();

    let mut codes: Vec<Option<i64>> = Vec::with_capacity(row_count);
    let mut regions: Vec<Option<String>> = Vec::with_capacity(row_count);
    let mut names: Vec<Option<String>> = Vec::with_capacity(row_count);
    let mut unmatched: BTreeSet<String> = BTreeSet::new();
    let mut matched = 0usize;

    for idx in 0..row_count {
        let code = match code_column {
            Some((_, column)) => any_to_string_non_empty(column.get(idx)?),
            None => None,
        };
        let name = match name_column {
            Some(column) => any_to_string_non_empty(column.get(idx)?),
            None => None,
        };

        let code_key = code.as_deref().map(str::trim);
        let name_key = name.as_deref().map(str::trim);
        let entry = code_key
            .and_then(|code| lookup.find_by_code(code))
            .or_else(|| name_key.and_then(|name| lookup.find_by_name(name)));
        let (key_name, key) = match (code_key, code_column) {
            (Some(code), Some((column, _))) => (column, Some(code)),
            _ => (enrichment.name_column, name_key),
        };

        match entry {
            Some(MunicipalityEntry {
                ibge_code,
                name: canonical,
                administrative_region,
            }) => {
                matched += 1;
                codes.push(Some(*ibge_code));
                regions.push(administrative_region.clone());
                names.push(Some(canonical.clone()));
            }
            None => {
                if let Some(key) = key {
                    tally.record(IssueKind::UnmatchedMunicipality, key_name, key);
                    unmatched.insert(key.to_string());
                }
                codes.push(None);
                regions.push(None);
                names.push(name.as_deref().map(str::trim).map(str::to_string));
            }
        }
    }

    if !unmatched.is_empty() {
        tracing::warn!(
            distinct_keys = unmatched.len(),
            matched_rows = matched,
            rows = row_count,
            "municipality keys not found in lookup"
        );
    }
    for key in &unmatched {
        tracing::debug!(key = %key, "unmatched municipality key");
    }

    Ok(vec![
        Series::new(enrichment.code_output.into(), codes).into_column(),
        Series::new(enrichment.region_output.into(), regions).into_column(),
        Series::new(enrichment.name_output.into(), names).into_column(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use infosiga_model::DatasetKind;
    use infosiga_model::columns::incidents;

    fn enrichment() -> MunicipalityEnrichment {
        MunicipalityEnrichment {
            code_columns: incidents::CODE_KEYS,
            name_column: incidents::MUNICIPALITY,
            code_output: incidents::IBGE_CODE,
            region_output: incidents::REGION,
            name_output: incidents::MUNICIPALITY,
        }
    }

    #[test]
    fn key_column_prefers_codes() {
        let e = enrichment();
        assert_eq!(key_column(&e, &["municipio", "codigo_ibge"]), Some("codigo_ibge"));
        assert_eq!(key_column(&e, &["municipio"]), Some("municipio"));
        assert_eq!(key_column(&e, &["logradouro"]), None);
    }

    #[test]
    fn code_rows_fall_back_to_name_when_blank() {
        let lookup = LookupTable::embedded().unwrap();
        let df = df! {
            "cod_ibge" => &[Some("3509502"), None],
            "municipio" => &[Some("CAMPINAS"), Some("SANTOS")],
        }
        .unwrap();
        let mut tally = IssueTally::new();
        let columns = enrich_municipality(&df, &enrichment(), &lookup, &mut tally).unwrap();

        let codes = columns[0].i64().unwrap();
        assert_eq!(codes.get(0), Some(3509502));
        assert_eq!(codes.get(1), Some(3548500));
        assert!(tally.is_empty());
    }

    #[test]
    fn unknown_code_falls_back_to_name() {
        let lookup = LookupTable::embedded().unwrap();
        let df = df! {
            "cod_ibge" => &[Some("9999999"), Some("9999999")],
            "municipio" => &[Some("CAMPINAS"), Some("ATLANTIDA")],
        }
        .unwrap();
        let mut tally = IssueTally::new();
        let columns = enrich_municipality(&df, &enrichment(), &lookup, &mut tally).unwrap();

        let codes = columns[0].i64().unwrap();
        assert_eq!(codes.get(0), Some(3509502));
        assert_eq!(codes.get(1), None);
        let names = columns[2].str().unwrap();
        assert_eq!(names.get(0), Some("Campinas"));
        assert_eq!(names.get(1), Some("ATLANTIDA"));

        let issues = tally.into_report(DatasetKind::Incidents).issues;
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].column, "cod_ibge");
        assert_eq!(issues[0].value, "9999999");
    }
}
