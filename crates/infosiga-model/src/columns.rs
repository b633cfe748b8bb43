//! Source column names and fixed output projections.
//!
//! Column names are the ones used by the Infosiga open-data extract. Some
//! incident columns come in families sharing a prefix (`tp_veiculo_*`,
//! `gravidade_*`, `tp_sinistro_*`) whose members differ across vintages, so
//! projections name a [`ColumnFamily`] and expand it against the columns
//! actually present.

use crate::kind::DatasetKind;

/// Incident (`sinistros`) columns.
pub mod incidents {
    pub const ID: &str = "id_sinistro";
    pub const RECORD_TYPE: &str = "tipo_registro";
    pub const DATE: &str = "data_sinistro";
    pub const TIME: &str = "hora_sinistro";
    pub const IBGE_CODE: &str = "cod_ibge";
    pub const REGION: &str = "regiao_administrativa";
    pub const MUNICIPALITY: &str = "municipio";
    pub const STREET: &str = "logradouro";
    pub const STREET_NUMBER: &str = "numero_logradouro";
    pub const ROAD_TYPE: &str = "tipo_via";
    pub const LATITUDE: &str = "latitude";
    pub const LONGITUDE: &str = "longitude";
    pub const ADMINISTRATION: &str = "administracao";
    pub const CONSERVATION: &str = "conservacao";
    pub const JURISDICTION: &str = "jurisdicao";
    pub const PRIMARY_TYPE: &str = "tp_sinistro_primario";

    /// Source columns that may carry the municipality code, in preference order.
    pub const CODE_KEYS: &[&str] = &["cod_ibge", "codigo_ibge", "cod_municipio"];

    pub const VEHICLE_COUNT_PREFIX: &str = "tp_veiculo_";
    pub const SEVERITY_COUNT_PREFIX: &str = "gravidade_";
    pub const SUB_TYPE_FLAG_PREFIX: &str = "tp_sinistro_";
}

/// Person (`pessoas`) columns.
pub mod persons {
    pub const ID: &str = "id_sinistro";
    pub const DATE: &str = "data_sinistro";
    pub const DEATH_DATE: &str = "data_obito";
    pub const SEX: &str = "sexo";
    pub const AGE: &str = "idade";
    pub const VICTIM_ROLE: &str = "tipo_de_vitima";
    pub const DEMOGRAPHIC_BRACKET: &str = "faixa_etaria_demografica";
    pub const LEGAL_BRACKET: &str = "faixa_etaria_legal";
    pub const VEHICLE_TYPE: &str = "tipo_veiculo_vitima";
    pub const TRAVEL_MODE: &str = "modo_deslocamento";
    pub const INJURY: &str = "gravidade_lesao";
    pub const DEATH_LOCATION: &str = "local_obito";
}

/// Vehicle (`veiculos`) columns.
pub mod vehicles {
    pub const ID: &str = "id_sinistro";
    pub const VEHICLE_ID: &str = "id_veiculo";
    pub const MANUFACTURE_YEAR: &str = "ano_fab";
    pub const MODEL_YEAR: &str = "ano_modelo";
    pub const COLOR: &str = "cor_veiculo";
    pub const VEHICLE_TYPE: &str = "tipo_veiculo";
}

/// A group of incident columns identified by name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnFamily {
    /// `tp_veiculo_*`: number of vehicles of each type.
    VehicleCounts,
    /// `gravidade_*`: number of victims at each severity.
    SeverityCounts,
    /// `tp_sinistro_*` except `tp_sinistro_primario`: `S`/missing flags.
    SubTypeFlags,
}

impl ColumnFamily {
    pub const fn prefix(&self) -> &'static str {
        match self {
            Self::VehicleCounts => incidents::VEHICLE_COUNT_PREFIX,
            Self::SeverityCounts => incidents::SEVERITY_COUNT_PREFIX,
            Self::SubTypeFlags => incidents::SUB_TYPE_FLAG_PREFIX,
        }
    }

    /// Returns true when `column` belongs to this family.
    pub fn contains(&self, column: &str) -> bool {
        let prefixed = column.starts_with(self.prefix()) && column.len() > self.prefix().len();
        match self {
            Self::SubTypeFlags => prefixed && column != incidents::PRIMARY_TYPE,
            _ => prefixed,
        }
    }

    /// Members of this family among `columns`, in their original order.
    pub fn members<'a>(&self, columns: &[&'a str]) -> Vec<&'a str> {
        columns
            .iter()
            .copied()
            .filter(|name| self.contains(name))
            .collect()
    }
}

/// One slot of an output projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionItem {
    Column(&'static str),
    Family(ColumnFamily),
}

const INCIDENT_PROJECTION: &[ProjectionItem] = &[
    ProjectionItem::Column(incidents::ID),
    ProjectionItem::Column(incidents::DATE),
    ProjectionItem::Column(incidents::TIME),
    ProjectionItem::Column(incidents::IBGE_CODE),
    ProjectionItem::Column(incidents::REGION),
    ProjectionItem::Column(incidents::MUNICIPALITY),
    ProjectionItem::Column(incidents::STREET),
    ProjectionItem::Column(incidents::STREET_NUMBER),
    ProjectionItem::Column(incidents::ROAD_TYPE),
    ProjectionItem::Column(incidents::LATITUDE),
    ProjectionItem::Column(incidents::LONGITUDE),
    ProjectionItem::Family(ColumnFamily::VehicleCounts),
    ProjectionItem::Column(incidents::RECORD_TYPE),
    ProjectionItem::Family(ColumnFamily::SeverityCounts),
    ProjectionItem::Column(incidents::ADMINISTRATION),
    ProjectionItem::Column(incidents::CONSERVATION),
    ProjectionItem::Column(incidents::JURISDICTION),
    ProjectionItem::Column(incidents::PRIMARY_TYPE),
    ProjectionItem::Family(ColumnFamily::SubTypeFlags),
];

const PERSON_PROJECTION: &[ProjectionItem] = &[
    ProjectionItem::Column(persons::ID),
    ProjectionItem::Column(persons::DATE),
    ProjectionItem::Column(persons::DEATH_DATE),
    ProjectionItem::Column(persons::SEX),
    ProjectionItem::Column(persons::AGE),
    ProjectionItem::Column(persons::VICTIM_ROLE),
    ProjectionItem::Column(persons::DEMOGRAPHIC_BRACKET),
    ProjectionItem::Column(persons::LEGAL_BRACKET),
    ProjectionItem::Column(persons::VEHICLE_TYPE),
    ProjectionItem::Column(persons::TRAVEL_MODE),
    ProjectionItem::Column(persons::INJURY),
];

const VEHICLE_PROJECTION: &[ProjectionItem] = &[
    ProjectionItem::Column(vehicles::ID),
    ProjectionItem::Column(vehicles::VEHICLE_ID),
    ProjectionItem::Column(vehicles::MANUFACTURE_YEAR),
    ProjectionItem::Column(vehicles::MODEL_YEAR),
    ProjectionItem::Column(vehicles::COLOR),
    ProjectionItem::Column(vehicles::VEHICLE_TYPE),
];

const INCIDENT_REQUIRED: &[&str] = &[
    incidents::ID,
    incidents::RECORD_TYPE,
    incidents::DATE,
    incidents::TIME,
    incidents::STREET,
    incidents::STREET_NUMBER,
    incidents::ROAD_TYPE,
    incidents::LATITUDE,
    incidents::LONGITUDE,
    incidents::ADMINISTRATION,
    incidents::CONSERVATION,
    incidents::JURISDICTION,
    incidents::PRIMARY_TYPE,
];

const PERSON_REQUIRED: &[&str] = &[
    persons::ID,
    persons::DATE,
    persons::DEATH_DATE,
    persons::SEX,
    persons::AGE,
    persons::VICTIM_ROLE,
    persons::DEMOGRAPHIC_BRACKET,
    persons::LEGAL_BRACKET,
    persons::VEHICLE_TYPE,
    persons::INJURY,
];

const VEHICLE_REQUIRED: &[&str] = &[
    vehicles::ID,
    vehicles::VEHICLE_ID,
    vehicles::MANUFACTURE_YEAR,
    vehicles::MODEL_YEAR,
    vehicles::COLOR,
    vehicles::VEHICLE_TYPE,
];

impl DatasetKind {
    /// Fixed output projection for this kind.
    pub const fn projection(&self) -> &'static [ProjectionItem] {
        match self {
            Self::Incidents => INCIDENT_PROJECTION,
            Self::Persons => PERSON_PROJECTION,
            Self::Vehicles => VEHICLE_PROJECTION,
        }
    }

    /// Source columns that must be present for cleaning.
    ///
    /// Incidents additionally need one municipality key (`municipio` or one
    /// of [`incidents::CODE_KEYS`]); that choice is checked by the recoder.
    pub const fn required_columns(&self) -> &'static [&'static str] {
        match self {
            Self::Incidents => INCIDENT_REQUIRED,
            Self::Persons => PERSON_REQUIRED,
            Self::Vehicles => VEHICLE_REQUIRED,
        }
    }
}

/// Expands a projection against the source columns.
///
/// Families are replaced by their members in source order. Plain columns are
/// kept whether or not the source has them.
pub fn resolve_projection(kind: DatasetKind, source_columns: &[&str]) -> Vec<String> {
    let mut resolved = Vec::new();
    for item in kind.projection() {
        match item {
            ProjectionItem::Column(name) => resolved.push((*name).to_string()),
            ProjectionItem::Family(family) => resolved.extend(
                family
                    .members(source_columns)
                    .into_iter()
                    .map(str::to_string),
            ),
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_type_flags_exclude_primary_type() {
        let family = ColumnFamily::SubTypeFlags;
        assert!(family.contains("tp_sinistro_atropelamento"));
        assert!(!family.contains("tp_sinistro_primario"));
        assert!(!family.contains("tp_veiculo_motocicleta"));
    }

    #[test]
    fn count_families_match_prefix() {
        assert!(ColumnFamily::VehicleCounts.contains("tp_veiculo_onibus"));
        assert!(ColumnFamily::SeverityCounts.contains("gravidade_fatal"));
        assert!(!ColumnFamily::SeverityCounts.contains("gravidade_"));
    }

    #[test]
    fn resolves_incident_families_in_source_order() {
        let source = [
            "id_sinistro",
            "gravidade_leve",
            "tp_veiculo_onibus",
            "tp_sinistro_choque",
            "tp_veiculo_automovel",
            "gravidade_fatal",
            "tp_sinistro_primario",
        ];
        let projection = resolve_projection(DatasetKind::Incidents, &source);
        let vehicle_start = projection
            .iter()
            .position(|c| c == "tp_veiculo_onibus")
            .unwrap();
        assert_eq!(projection[vehicle_start + 1], "tp_veiculo_automovel");
        assert_eq!(projection[vehicle_start + 2], "tipo_registro");
        assert_eq!(projection[vehicle_start + 3], "gravidade_leve");
        assert_eq!(projection[vehicle_start + 4], "gravidade_fatal");
        assert_eq!(projection.last().map(String::as_str), Some("tp_sinistro_choque"));
        assert_eq!(projection.first().map(String::as_str), Some("id_sinistro"));
    }

    #[test]
    fn person_projection_is_fixed() {
        let projection = resolve_projection(DatasetKind::Persons, &[]);
        assert_eq!(projection.len(), 11);
        assert_eq!(projection[9], "modo_deslocamento");
    }
}
