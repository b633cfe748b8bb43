//! Cleaning of the incident (`sinistros`) table.

mod common;

use common::{column_names, frame, ints, repeat, strings};
use infosiga_model::{DatasetKind, IssueKind};
use infosiga_normalization::{NormalizationError, clean};
use infosiga_standards::LookupTable;
use polars::prelude::*;

fn incidents(
    record_types: Vec<Option<&str>>,
    municipalities: Vec<Option<&str>>,
    extra: Vec<(&str, Vec<Option<&str>>)>,
) -> DataFrame {
    let rows = record_types.len();
    let mut columns = vec![
        ("id_sinistro", repeat(Some("100"), rows)),
        ("tipo_registro", record_types),
        ("data_sinistro", repeat(Some("21/04/2023"), rows)),
        ("hora_sinistro", repeat(Some("18:30"), rows)),
        ("municipio", municipalities),
        ("logradouro", repeat(Some("AV PAULISTA"), rows)),
        ("numero_logradouro", repeat(Some("1578"), rows)),
        ("tipo_via", repeat(Some("VIAS MUNICIPAIS"), rows)),
        ("latitude", repeat(Some("-23,5614"), rows)),
        ("longitude", repeat(Some("-46.6559"), rows)),
        ("administracao", repeat(Some("PREFEITURA"), rows)),
        ("conservacao", repeat(Some("PREFEITURA"), rows)),
        ("jurisdicao", repeat(Some("MUNICIPAL"), rows)),
        ("tp_sinistro_primario", repeat(Some("COLISAO"), rows)),
        ("unused_source_column", repeat(Some("x"), rows)),
    ];
    columns.extend(extra);
    frame(&columns)
}

fn lookup() -> LookupTable {
    LookupTable::embedded().expect("embedded lookup")
}

#[test]
fn output_follows_fixed_projection() {
    let df = incidents(
        vec![Some("SINISTRO FATAL")],
        vec![Some("SAO PAULO")],
        vec![
            ("gravidade_leve", vec![Some("1")]),
            ("tp_veiculo_motocicleta", vec![Some("1")]),
            ("tp_sinistro_atropelamento", vec![Some("S")]),
            ("tp_veiculo_automovel", vec![None]),
            ("gravidade_fatal", vec![None]),
        ],
    );

    let cleaned = clean(&df, DatasetKind::Incidents, &lookup()).unwrap();
    let names = column_names(&cleaned.frame).join(",");
    insta::assert_snapshot!(names, @"id_sinistro,data_sinistro,hora_sinistro,cod_ibge,regiao_administrativa,municipio,logradouro,numero_logradouro,tipo_via,latitude,longitude,tp_veiculo_motocicleta,tp_veiculo_automovel,tipo_registro,gravidade_leve,gravidade_fatal,administracao,conservacao,jurisdicao,tp_sinistro_primario,tp_sinistro_atropelamento");
}

#[test]
fn record_type_recodes_and_unknown_is_silently_null() {
    let df = incidents(
        vec![
            Some("SINISTRO FATAL"),
            Some("NOTIFICACAO"),
            Some("SINISTRO NÃO FATAL"),
            Some("OCORRENCIA"),
            Some("NAO DISPONIVEL"),
        ],
        repeat(Some("SAO PAULO"), 5),
        Vec::new(),
    );

    let cleaned = clean(&df, DatasetKind::Incidents, &lookup()).unwrap();
    assert_eq!(
        strings(&cleaned.frame, "tipo_registro"),
        vec![
            Some("Sinistro fatal".to_string()),
            Some("Notificação".to_string()),
            Some("Sinistro não fatal".to_string()),
            None,
            None,
        ]
    );
    assert_eq!(cleaned.report.issues_for_column("tipo_registro").count(), 0);
}

#[test]
fn not_available_is_null_in_every_mapped_column() {
    let mut df = incidents(vec![Some("NAO DISPONIVEL")], vec![Some("SAO PAULO")], Vec::new());
    let mapped = [
        "tipo_via",
        "administracao",
        "conservacao",
        "jurisdicao",
        "tp_sinistro_primario",
    ];
    for name in mapped {
        df.with_column(Series::new(name.into(), &[Some("NAO DISPONIVEL")]))
            .unwrap();
    }

    let cleaned = clean(&df, DatasetKind::Incidents, &lookup()).unwrap();
    for name in mapped.iter().chain(std::iter::once(&"tipo_registro")) {
        assert_eq!(strings(&cleaned.frame, name), vec![None], "{name}");
    }
    assert!(cleaned.report.is_clean());
}

#[test]
fn typed_columns() {
    let df = incidents(vec![Some("SINISTRO FATAL")], vec![Some("SAO PAULO")], Vec::new());
    let cleaned = clean(&df, DatasetKind::Incidents, &lookup()).unwrap();
    let out = &cleaned.frame;

    assert_eq!(out.column("data_sinistro").unwrap().dtype(), &DataType::Date);
    assert_eq!(out.column("hora_sinistro").unwrap().dtype(), &DataType::Time);
    assert_eq!(strings(out, "data_sinistro"), vec![Some("2023-04-21".to_string())]);

    let latitude = out.column("latitude").unwrap().f64().unwrap().get(0);
    assert_eq!(latitude, Some(-23.5614));
    let number = out.column("numero_logradouro").unwrap().f64().unwrap().get(0);
    assert_eq!(number, Some(1578.0));

    assert_eq!(strings(out, "tipo_via"), vec![Some("Via municipal".to_string())]);
    assert_eq!(strings(out, "jurisdicao"), vec![Some("Municipal".to_string())]);
    assert_eq!(strings(out, "tp_sinistro_primario"), vec![Some("Colisão".to_string())]);
    assert_eq!(strings(out, "administracao"), vec![Some("Prefeitura".to_string())]);
    assert_eq!(strings(out, "conservacao"), vec![Some("PREFEITURA".to_string())]);
}

#[test]
fn counts_default_to_zero_and_flag_garbage() {
    let df = incidents(
        repeat(Some("SINISTRO NAO FATAL"), 4),
        repeat(Some("CAMPINAS"), 4),
        vec![
            ("tp_veiculo_onibus", vec![None, Some("2"), Some("1.0"), Some("muitos")]),
            ("gravidade_grave", vec![Some("0"), None, Some("3"), Some("")]),
        ],
    );

    let cleaned = clean(&df, DatasetKind::Incidents, &lookup()).unwrap();
    assert_eq!(
        ints(&cleaned.frame, "tp_veiculo_onibus"),
        vec![Some(0), Some(2), Some(1), None]
    );
    assert_eq!(
        ints(&cleaned.frame, "gravidade_grave"),
        vec![Some(0), Some(0), Some(3), Some(0)]
    );

    let issues: Vec<_> = cleaned.report.issues_for_column("tp_veiculo_onibus").collect();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].kind, IssueKind::InvalidCount);
    assert_eq!(issues[0].value, "muitos");
}

#[test]
fn sub_type_flags_become_zero_one() {
    let df = incidents(
        repeat(Some("SINISTRO FATAL"), 4),
        repeat(Some("SANTOS"), 4),
        vec![(
            "tp_sinistro_colisao_traseira",
            vec![Some("S"), None, Some("N"), Some("TALVEZ")],
        )],
    );

    let cleaned = clean(&df, DatasetKind::Incidents, &lookup()).unwrap();
    assert_eq!(
        ints(&cleaned.frame, "tp_sinistro_colisao_traseira"),
        vec![Some(1), Some(0), Some(0), None]
    );
    assert_eq!(cleaned.report.count_for(IssueKind::InvalidFlag), 1);
    // The primary type is a category, never a flag.
    assert_eq!(
        cleaned.frame.column("tp_sinistro_primario").unwrap().dtype(),
        &DataType::String
    );
}

#[test]
fn enrichment_by_name_keeps_unmatched_rows() {
    let df = incidents(
        repeat(Some("SINISTRO FATAL"), 3),
        vec![Some("SÃO PAULO"), Some("ATLANTIDA"), None],
        Vec::new(),
    );

    let cleaned = clean(&df, DatasetKind::Incidents, &lookup()).unwrap();
    let out = &cleaned.frame;
    assert_eq!(out.height(), 3);
    assert_eq!(ints(out, "cod_ibge"), vec![Some(3550308), None, None]);
    assert_eq!(
        strings(out, "regiao_administrativa"),
        vec![Some("Metropolitana de São Paulo".to_string()), None, None]
    );
    assert_eq!(
        strings(out, "municipio"),
        vec![Some("São Paulo".to_string()), Some("ATLANTIDA".to_string()), None]
    );

    let unmatched: Vec<_> = cleaned
        .report
        .issues
        .iter()
        .filter(|issue| issue.kind == IssueKind::UnmatchedMunicipality)
        .collect();
    assert_eq!(unmatched.len(), 1);
    assert_eq!(unmatched[0].value, "ATLANTIDA");
}

#[test]
fn enrichment_prefers_code_column() {
    let df = incidents(
        repeat(Some("SINISTRO FATAL"), 2),
        vec![Some("nome antigo"), Some("CAMPINAS")],
        vec![("cod_ibge", vec![Some("354850"), Some("3509502")])],
    );

    let cleaned = clean(&df, DatasetKind::Incidents, &lookup()).unwrap();
    assert_eq!(ints(&cleaned.frame, "cod_ibge"), vec![Some(3548500), Some(3509502)]);
    assert_eq!(
        strings(&cleaned.frame, "municipio"),
        vec![Some("Santos".to_string()), Some("Campinas".to_string())]
    );
}

#[test]
fn missing_required_columns_are_listed() {
    let df = incidents(vec![Some("SINISTRO FATAL")], vec![Some("SANTOS")], Vec::new())
        .drop("tipo_via")
        .unwrap()
        .drop("municipio")
        .unwrap();

    let err = clean(&df, DatasetKind::Incidents, &lookup()).unwrap_err();
    match err {
        NormalizationError::SchemaMismatch { kind, missing } => {
            assert_eq!(kind, DatasetKind::Incidents);
            assert_eq!(missing, vec!["tipo_via".to_string(), "municipio".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_table_keeps_schema() {
    let df = incidents(Vec::new(), Vec::new(), Vec::new());
    let cleaned = clean(&df, DatasetKind::Incidents, &lookup()).unwrap();
    assert_eq!(cleaned.height(), 0);
    assert_eq!(cleaned.frame.column("cod_ibge").unwrap().dtype(), &DataType::Int64);
}
