//! Tests for dataset kinds, projections and quality reports.

use infosiga_model::columns::incidents;
use infosiga_model::{DatasetKind, IssueKind, IssueTally, ProjectionItem, resolve_projection};

#[test]
fn kind_listing_is_stable() {
    let listing: Vec<String> = DatasetKind::all()
        .iter()
        .map(|kind| format!("{}={}", kind.prefix(), kind.label()))
        .collect();
    insta::assert_snapshot!(listing.join(","), @"sinistros=Incidents,pessoas=Persons,veiculos=Vehicles");
}

#[test]
fn every_required_column_is_projected() {
    for kind in DatasetKind::all() {
        let projected: Vec<&str> = kind
            .projection()
            .iter()
            .filter_map(|item| match item {
                ProjectionItem::Column(name) => Some(*name),
                ProjectionItem::Family(_) => None,
            })
            .collect();
        for required in kind.required_columns() {
            assert!(
                projected.contains(required),
                "{kind}: required column {required} missing from projection"
            );
        }
    }
}

#[test]
fn incident_projection_without_families_has_fixed_columns() {
    let projection = resolve_projection(DatasetKind::Incidents, &[]);
    assert_eq!(projection.len(), 16);
    assert_eq!(projection[3], incidents::IBGE_CODE);
    assert_eq!(projection[4], incidents::REGION);
    assert_eq!(projection[5], incidents::MUNICIPALITY);
}

#[test]
fn quality_report_serializes_to_json() {
    let mut tally = IssueTally::new();
    tally.record(IssueKind::UnmatchedMunicipality, "municipio", "ATLANTIDA");
    let report = tally.into_report(DatasetKind::Incidents);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["dataset"], "incidents");
    assert_eq!(json["issues"][0]["kind"], "unmatched_municipality");
    assert_eq!(json["issues"][0]["count"], 1);
}
