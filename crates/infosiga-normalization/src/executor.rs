//! Rule execution.
//!
//! Applies a [`RuleSet`] column by column to a raw table and assembles the
//! typed output in the kind's fixed projection order.

use std::collections::HashMap;

use infosiga_common::{any_to_f64, any_to_i64, any_to_string_non_empty};
use infosiga_model::{DatasetKind, IssueKind, IssueTally, resolve_projection};
use infosiga_standards::LookupTable;
use polars::prelude::*;

use crate::enrichment::{enrich_municipality, key_column};
use crate::error::{NormalizationError, Result};
use crate::normalization::{
    CategoryMap, IndicatorValue, Recoded, days_since_epoch, nanos_since_midnight,
    normalize_color, parse_count, parse_date, parse_flag, parse_time,
};
use crate::rules::rule_set;
use crate::types::{CleanedTable, ColumnSelector, ColumnTransform, RuleSet};

/// Cleans one raw table of the given kind.
///
/// The output has exactly as many rows as `table`. Columns the kind does not
/// use are ignored; missing required columns fail with
/// [`NormalizationError::SchemaMismatch`].
pub fn clean(table: &DataFrame, kind: DatasetKind, lookup: &LookupTable) -> Result<CleanedTable> {
    execute_rules(table, &rule_set(kind), lookup)
}

/// Applies an explicit rule set.
pub fn execute_rules(
    table: &DataFrame,
    rules: &RuleSet,
    lookup: &LookupTable,
) -> Result<CleanedTable> {
    let kind = rules.kind;
    let row_count = table.height();
    let source_names: Vec<&str> = table
        .get_column_names()
        .into_iter()
        .map(PlSmallStr::as_str)
        .collect();

    check_required(rules, &source_names)?;

    let mut tally = IssueTally::new();
    let mut produced: HashMap<String, Column> = HashMap::new();

    for rule in &rules.rules {
        let targets: Vec<&str> = match (rule.selector, &rule.transform) {
            (ColumnSelector::Named(name), ColumnTransform::Derived { .. }) => vec![name],
            (ColumnSelector::Named(name), _) => {
                if source_names.contains(&name) {
                    vec![name]
                } else {
                    tracing::debug!(kind = %kind, column = %name, "optional column absent");
                    Vec::new()
                }
            }
            (ColumnSelector::Family(family), _) => family.members(&source_names),
        };

        for target in targets {
            let series = execute_rule(table, &produced, target, &rule.transform, &mut tally)?;
            produced.insert(target.to_string(), series.into_column());
        }
    }

    if let Some(enrichment) = &rules.enrichment {
        for column in enrich_municipality(table, enrichment, lookup, &mut tally)? {
            produced.insert(column.name().to_string(), column);
        }
    }

    let projection = resolve_projection(kind, &source_names);
    let mut columns = Vec::with_capacity(projection.len());
    for name in &projection {
        let column = produced
            .remove(name)
            .ok_or_else(|| NormalizationError::ColumnNotFound(name.clone()))?;
        columns.push(column);
    }
    let frame = assemble(kind, row_count, columns)?;

    let report = tally.into_report(kind);
    tracing::info!(
        kind = %kind,
        rows = frame.height(),
        columns = frame.width(),
        issues = report.issues.len(),
        "cleaned table"
    );

    Ok(CleanedTable {
        kind,
        frame,
        report,
    })
}

fn check_required(rules: &RuleSet, source_names: &[&str]) -> Result<()> {
    let mut missing: Vec<String> = rules
        .kind
        .required_columns()
        .iter()
        .filter(|name| !source_names.contains(name))
        .map(|name| (*name).to_string())
        .collect();

    if let Some(enrichment) = &rules.enrichment
        && key_column(enrichment, source_names).is_none()
    {
        missing.push(enrichment.name_column.to_string());
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(NormalizationError::SchemaMismatch {
            kind: rules.kind,
            missing,
        })
    }
}

/// Builds the output frame, refusing any column whose length differs from
/// the input row count.
fn assemble(kind: DatasetKind, row_count: usize, columns: Vec<Column>) -> Result<DataFrame> {
    if let Some(column) = columns.iter().find(|column| column.len() != row_count) {
        return Err(NormalizationError::RowCountChanged {
            kind,
            input: row_count,
            output: column.len(),
        });
    }
    Ok(DataFrame::new(columns)?)
}

/// Produces one target column.
///
/// Derived transforms read an already produced column; every other
/// transform reads the raw source column of the same name.
fn execute_rule(
    table: &DataFrame,
    produced: &HashMap<String, Column>,
    target: &str,
    transform: &ColumnTransform,
    tally: &mut IssueTally,
) -> Result<Series> {
    let raw = move || {
        table
            .column(target)
            .map_err(|_| NormalizationError::ColumnNotFound(target.to_string()))
    };
    match transform {
        ColumnTransform::Text => execute_text(raw()?, target),
        ColumnTransform::Category(map) => {
            let values = recode_values(raw()?, target, map, tally)?;
            Ok(Series::new(target.into(), values))
        }
        ColumnTransform::Ordered { map, levels } => {
            let values = recode_values(raw()?, target, map, tally)?;
            ordered_categorical(target, values, levels)
        }
        ColumnTransform::Date => execute_date(raw()?, target),
        ColumnTransform::Time => execute_time(raw()?, target),
        ColumnTransform::Float => execute_float(raw()?, target),
        ColumnTransform::Integer => execute_integer(raw()?, target),
        ColumnTransform::Count => {
            execute_indicator(raw()?, target, parse_count, IssueKind::InvalidCount, tally)
        }
        ColumnTransform::Flag => {
            execute_indicator(raw()?, target, parse_flag, IssueKind::InvalidFlag, tally)
        }
        ColumnTransform::Color => execute_color(raw()?, target),
        ColumnTransform::Derived { from, pairs } => {
            let source = produced
                .get(*from)
                .ok_or_else(|| NormalizationError::ColumnNotFound((*from).to_string()))?;
            execute_derived(source, target, pairs)
        }
    }
}

/// Execute trimmed string copy.
fn execute_text(source: &Column, target: &str) -> Result<Series> {
    let mut values: Vec<Option<String>> = Vec::with_capacity(source.len());
    for idx in 0..source.len() {
        let raw = any_to_string_non_empty(source.get(idx)?);
        values.push(raw.map(|value| value.trim().to_string()));
    }
    Ok(Series::new(target.into(), values))
}

/// Recode every cell, tallying unmapped values.
fn recode_values(
    source: &Column,
    target: &str,
    map: &CategoryMap,
    tally: &mut IssueTally,
) -> Result<Vec<Option<String>>> {
    let mut values = Vec::with_capacity(source.len());
    let mut unmapped = 0usize;

    for idx in 0..source.len() {
        let raw = any_to_string_non_empty(source.get(idx)?);
        let recoded = map.recode(raw.as_deref());
        if recoded == Recoded::Unmapped
            && let Some(raw) = raw.as_deref()
        {
            tally.record(IssueKind::UnmappedCategory, target, raw.trim());
            unmapped += 1;
        }
        values.push(recoded.into_option());
    }

    if unmapped > 0 {
        tracing::warn!(
            column = %target,
            cells = unmapped,
            "unmapped category values set to null"
        );
    }
    Ok(values)
}

/// Builds an `Enum` series whose physical order follows `levels`.
///
/// Every value must be one of `levels` or null.
fn ordered_categorical(
    target: &str,
    values: Vec<Option<String>>,
    levels: &[&str],
) -> Result<Series> {
    let categories = FrozenCategories::new(levels.iter().copied())?;
    let dtype = DataType::from_frozen_categories(categories);
    Ok(Series::new(target.into(), values).cast(&dtype)?)
}

fn execute_date(source: &Column, target: &str) -> Result<Series> {
    let mut values: Vec<Option<i32>> = Vec::with_capacity(source.len());
    let mut failures = 0usize;

    for idx in 0..source.len() {
        let raw = any_to_string_non_empty(source.get(idx)?);
        let parsed = raw.as_deref().and_then(parse_date);
        if raw.is_some() && parsed.is_none() {
            failures += 1;
        }
        values.push(parsed.map(days_since_epoch));
    }

    if failures > 0 {
        tracing::debug!(column = %target, failures, "unparseable dates set to null");
    }
    Ok(Series::new(target.into(), values).cast(&DataType::Date)?)
}

fn execute_time(source: &Column, target: &str) -> Result<Series> {
    let mut values: Vec<Option<i64>> = Vec::with_capacity(source.len());
    let mut failures = 0usize;

    for idx in 0..source.len() {
        let raw = any_to_string_non_empty(source.get(idx)?);
        let parsed = raw.as_deref().and_then(parse_time);
        if raw.is_some() && parsed.is_none() {
            failures += 1;
        }
        values.push(parsed.map(nanos_since_midnight));
    }

    if failures > 0 {
        tracing::debug!(column = %target, failures, "unparseable times set to null");
    }
    Ok(Series::new(target.into(), values).cast(&DataType::Time)?)
}

fn execute_float(source: &Column, target: &str) -> Result<Series> {
    let mut values: Vec<Option<f64>> = Vec::with_capacity(source.len());
    for idx in 0..source.len() {
        values.push(any_to_f64(source.get(idx)?));
    }
    Ok(Series::new(target.into(), values))
}

fn execute_integer(source: &Column, target: &str) -> Result<Series> {
    let mut values: Vec<Option<i64>> = Vec::with_capacity(source.len());
    for idx in 0..source.len() {
        values.push(any_to_i64(source.get(idx)?));
    }
    Ok(Series::new(target.into(), values))
}

fn execute_indicator(
    source: &Column,
    target: &str,
    parse: fn(Option<&str>) -> IndicatorValue,
    issue: IssueKind,
    tally: &mut IssueTally,
) -> Result<Series> {
    let mut values: Vec<Option<i64>> = Vec::with_capacity(source.len());
    let mut invalid = 0usize;

    for idx in 0..source.len() {
        let raw = any_to_string_non_empty(source.get(idx)?);
        let parsed = parse(raw.as_deref());
        if parsed == IndicatorValue::Invalid
            && let Some(raw) = raw.as_deref()
        {
            tally.record(issue, target, raw.trim());
            invalid += 1;
        }
        values.push(parsed.value());
    }

    if invalid > 0 {
        tracing::warn!(column = %target, cells = invalid, issue = issue.label(), "invalid values set to null");
    }
    Ok(Series::new(target.into(), values))
}

fn execute_color(source: &Column, target: &str) -> Result<Series> {
    let mut values: Vec<Option<String>> = Vec::with_capacity(source.len());
    for idx in 0..source.len() {
        let raw = any_to_string_non_empty(source.get(idx)?);
        values.push(normalize_color(raw.as_deref()));
    }
    Ok(Series::new(target.into(), values))
}

/// Maps already-recoded labels of another column; anything else is null.
fn execute_derived(
    source: &Column,
    target: &str,
    pairs: &[(&'static str, &'static str)],
) -> Result<Series> {
    let mut values: Vec<Option<&str>> = Vec::with_capacity(source.len());
    for idx in 0..source.len() {
        let raw = any_to_string_non_empty(source.get(idx)?);
        let derived = raw.as_deref().and_then(|label| {
            pairs
                .iter()
                .find(|(from, _)| *from == label)
                .map(|(_, to)| *to)
        });
        values.push(derived);
    }
    Ok(Series::new(target.into(), values))
}
