use infosiga_model::columns::incidents;
use infosiga_model::{ColumnFamily, DatasetKind};

use crate::normalization::{CategoryMap, UnmappedPolicy};
use crate::types::{ColumnRule, ColumnTransform, MunicipalityEnrichment, RuleSet};

const RECORD_TYPES: &[(&str, &str)] = &[
    ("SINISTRO FATAL", "Sinistro fatal"),
    ("SINISTRO NAO FATAL", "Sinistro não fatal"),
    ("NOTIFICACAO", "Notificação"),
];

const ROAD_TYPES: &[(&str, &str)] = &[
    ("RODOVIAS", "Rodovia"),
    ("RODOVIA", "Rodovia"),
    ("VIAS MUNICIPAIS", "Via municipal"),
    ("VIA MUNICIPAL", "Via municipal"),
];

const ADMINISTRATIONS: &[(&str, &str)] = &[
    ("CONCESSIONARIA", "Concessionária"),
    ("CONCESSIONARIA-ANTT", "Concessionária ANTT"),
    ("CONCESSIONARIA-ARTESP", "Concessionária ARTESP"),
    ("PREFEITURA", "Prefeitura"),
    ("DER", "DER"),
    ("DNIT", "DNIT"),
];

const JURISDICTIONS: &[(&str, &str)] = &[
    ("ESTADUAL", "Estadual"),
    ("MUNICIPAL", "Municipal"),
    ("FEDERAL", "Federal"),
];

const PRIMARY_TYPES: &[(&str, &str)] = &[
    ("ATROPELAMENTO", "Atropelamento"),
    ("COLISAO", "Colisão"),
    ("CHOQUE", "Choque"),
    ("OUTROS", "Outros"),
];

pub(super) fn rules() -> RuleSet {
    let rules = vec![
        ColumnRule::named(incidents::ID, ColumnTransform::Text),
        // Unknown markers are not incidents of any listed type.
        ColumnRule::category(
            incidents::RECORD_TYPE,
            CategoryMap::new(RECORD_TYPES, UnmappedPolicy::Absent),
        ),
        ColumnRule::named(incidents::DATE, ColumnTransform::Date),
        ColumnRule::named(incidents::TIME, ColumnTransform::Time),
        ColumnRule::named(incidents::STREET, ColumnTransform::Text),
        ColumnRule::named(incidents::STREET_NUMBER, ColumnTransform::Float),
        ColumnRule::category(
            incidents::ROAD_TYPE,
            CategoryMap::new(ROAD_TYPES, UnmappedPolicy::Flag),
        ),
        ColumnRule::named(incidents::LATITUDE, ColumnTransform::Float),
        ColumnRule::named(incidents::LONGITUDE, ColumnTransform::Float),
        ColumnRule::family(ColumnFamily::VehicleCounts, ColumnTransform::Count),
        ColumnRule::family(ColumnFamily::SeverityCounts, ColumnTransform::Count),
        ColumnRule::category(
            incidents::ADMINISTRATION,
            CategoryMap::new(ADMINISTRATIONS, UnmappedPolicy::PassThrough),
        ),
        ColumnRule::category(
            incidents::CONSERVATION,
            CategoryMap::new(&[], UnmappedPolicy::PassThrough),
        ),
        ColumnRule::category(
            incidents::JURISDICTION,
            CategoryMap::new(JURISDICTIONS, UnmappedPolicy::Flag),
        ),
        ColumnRule::category(
            incidents::PRIMARY_TYPE,
            CategoryMap::new(PRIMARY_TYPES, UnmappedPolicy::Flag),
        ),
        ColumnRule::family(ColumnFamily::SubTypeFlags, ColumnTransform::Flag),
    ];

    RuleSet {
        kind: DatasetKind::Incidents,
        rules,
        enrichment: Some(MunicipalityEnrichment {
            code_columns: incidents::CODE_KEYS,
            name_column: incidents::MUNICIPALITY,
            code_output: incidents::IBGE_CODE,
            region_output: incidents::REGION,
            name_output: incidents::MUNICIPALITY,
        }),
    }
}
