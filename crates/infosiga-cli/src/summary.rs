//! Terminal tables for pipeline results and the kind listing.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use infosiga_model::{DatasetKind, IssueKind, ProjectionItem, QualityIssue};

use crate::pipeline::{KindSummary, PipelineResult};

/// Issues shown per kind; the JSON report has all of them.
const MAX_ISSUES_PER_KIND: usize = 15;

pub fn print_summary(result: &PipelineResult) {
    println!("Source: {}", result.source);
    if let Some(sha256) = &result.archive_sha256 {
        println!("SHA-256: {sha256}");
    }
    println!("{}", summary_table(result));

    let issues = issue_table(&result.kinds);
    if let Some(table) = issues {
        println!();
        println!("Data-quality issues:");
        println!("{table}");
    }
}

pub fn summary_table(result: &PipelineResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kind"),
        header_cell("Files"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Issues"),
        header_cell("Output"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    for summary in &result.kinds {
        table.add_row(vec![
            kind_cell(summary.kind),
            Cell::new(summary.files),
            Cell::new(summary.rows),
            Cell::new(summary.columns),
            count_cell(summary.report.total_count()),
            match &summary.outputs {
                Some(outputs) => Cell::new(outputs.table.display()),
                None => dim_cell("-"),
            },
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(result.total_rows()).add_attribute(Attribute::Bold),
        dim_cell("-"),
        count_cell(result.total_issues()).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    table
}

fn issue_table(summaries: &[KindSummary]) -> Option<Table> {
    let mut rows: Vec<(DatasetKind, &QualityIssue)> = Vec::new();
    for summary in summaries {
        let mut issues: Vec<&QualityIssue> = summary.report.issues.iter().collect();
        issues.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.column.cmp(&b.column)));
        rows.extend(
            issues
                .into_iter()
                .take(MAX_ISSUES_PER_KIND)
                .map(|issue| (summary.kind, issue)),
        );
    }
    if rows.is_empty() {
        return None;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kind"),
        header_cell("Issue"),
        header_cell("Column"),
        header_cell("Value"),
        header_cell("Count"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Right);
    for (kind, issue) in rows {
        table.add_row(vec![
            kind_cell(kind),
            issue_cell(issue.kind),
            Cell::new(&issue.column),
            Cell::new(&issue.value),
            Cell::new(issue.count),
        ]);
    }
    Some(table)
}

/// Output columns of `kind`, with families written as `prefix*`.
pub fn projection_listing(kind: DatasetKind) -> String {
    kind.projection()
        .iter()
        .map(|item| match item {
            ProjectionItem::Column(name) => (*name).to_string(),
            ProjectionItem::Family(family) => format!("{}*", family.prefix()),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn kinds_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kind"),
        header_cell("Label"),
        header_cell("Output columns"),
    ]);
    apply_table_style(&mut table);
    for kind in DatasetKind::all() {
        table.add_row(vec![
            kind_cell(*kind),
            Cell::new(kind.label()),
            Cell::new(projection_listing(*kind)),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn kind_cell(kind: DatasetKind) -> Cell {
    Cell::new(kind.prefix())
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn issue_cell(kind: IssueKind) -> Cell {
    let color = match kind {
        IssueKind::UnmatchedMunicipality => Color::Magenta,
        IssueKind::UnmappedCategory => Color::Yellow,
        IssueKind::InvalidCount | IssueKind::InvalidFlag => Color::Red,
    };
    Cell::new(kind.label()).fg(color)
}

fn count_cell(count: u64) -> Cell {
    if count > 0 {
        Cell::new(count)
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use infosiga_model::QualityReport;

    fn summary(kind: DatasetKind, issues: Vec<QualityIssue>) -> KindSummary {
        KindSummary {
            kind,
            files: 1,
            rows: 10,
            columns: 6,
            report: QualityReport {
                dataset: kind,
                issues,
            },
            outputs: None,
        }
    }

    fn issue(column: &str, count: u64) -> QualityIssue {
        QualityIssue {
            kind: IssueKind::UnmappedCategory,
            column: column.to_string(),
            value: "X".to_string(),
            count,
        }
    }

    #[test]
    fn test_no_issue_table_when_clean() {
        assert!(issue_table(&[summary(DatasetKind::Vehicles, Vec::new())]).is_none());
    }

    #[test]
    fn test_issue_table_is_capped_per_kind() {
        let many = (0..40).map(|i| issue(&format!("col_{i:02}"), i)).collect();
        let table = issue_table(&[summary(DatasetKind::Persons, many)]).unwrap();
        assert_eq!(table.row_iter().count(), MAX_ISSUES_PER_KIND);
    }

    #[test]
    fn test_summary_has_total_row() {
        let result = PipelineResult {
            source: "dados".to_string(),
            archive_sha256: None,
            kinds: vec![
                summary(DatasetKind::Incidents, vec![issue("tipo_via", 3)]),
                summary(DatasetKind::Vehicles, Vec::new()),
            ],
        };
        assert_eq!(summary_table(&result).row_iter().count(), 3);
        assert_eq!(result.total_rows(), 20);
        assert_eq!(result.total_issues(), 3);
    }
}
