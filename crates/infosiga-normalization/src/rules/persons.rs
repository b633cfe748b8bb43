use infosiga_model::DatasetKind;
use infosiga_model::columns::persons;

use super::VEHICLE_TYPES;
use crate::normalization::{
    CategoryMap, DEMOGRAPHIC_LEVELS, LEGAL_LEVELS, UnmappedPolicy, bracket_map,
};
use crate::types::{ColumnRule, ColumnTransform, RuleSet};

const SEXES: &[(&str, &str)] = &[("MASCULINO", "Masculino"), ("FEMININO", "Feminino")];

const VICTIM_ROLES: &[(&str, &str)] = &[
    ("CONDUTOR", "Condutor"),
    ("PASSAGEIRO", "Passageiro"),
    ("PEDESTRE", "Pedestre"),
];

const INJURIES: &[(&str, &str)] = &[
    ("LEVE", "Leve"),
    ("GRAVE", "Grave"),
    ("FATAL", "Fatal"),
    ("ILESO", "Ileso"),
];

const DEATH_LOCATIONS: &[(&str, &str)] = &[
    ("HOSPITAL", "Hospital"),
    ("VIA PUBLICA", "Via pública"),
    ("LOCAL", "Local do sinistro"),
];

/// Mode of travel from the recoded victim vehicle.
const TRAVEL_MODES: &[(&str, &str)] = &[
    ("Pedestre", "Pedestre"),
    ("Motocicleta", "Ocupante de motocicleta"),
    ("Automóvel", "Ocupante de automóvel"),
    ("Bicicleta", "Ciclista"),
    ("Caminhão", "Ocupante de caminhão"),
    ("Ônibus", "Ocupante de ônibus"),
    ("Outros", "Outros"),
];

fn victim_vehicle_map() -> CategoryMap {
    let mut pairs = vec![("PEDESTRE", "Pedestre")];
    pairs.extend_from_slice(VEHICLE_TYPES);
    CategoryMap::new(&pairs, UnmappedPolicy::Flag)
}

pub(super) fn rules() -> RuleSet {
    let rules = vec![
        ColumnRule::named(persons::ID, ColumnTransform::Text),
        ColumnRule::named(persons::DATE, ColumnTransform::Date),
        ColumnRule::named(persons::DEATH_DATE, ColumnTransform::Date),
        ColumnRule::category(persons::SEX, CategoryMap::new(SEXES, UnmappedPolicy::Flag)),
        ColumnRule::named(persons::AGE, ColumnTransform::Integer),
        ColumnRule::category(
            persons::VICTIM_ROLE,
            CategoryMap::new(VICTIM_ROLES, UnmappedPolicy::Flag),
        ),
        ColumnRule::named(
            persons::DEMOGRAPHIC_BRACKET,
            ColumnTransform::Ordered {
                map: bracket_map(DEMOGRAPHIC_LEVELS),
                levels: DEMOGRAPHIC_LEVELS,
            },
        ),
        ColumnRule::named(
            persons::LEGAL_BRACKET,
            ColumnTransform::Ordered {
                map: bracket_map(LEGAL_LEVELS),
                levels: LEGAL_LEVELS,
            },
        ),
        ColumnRule::category(persons::VEHICLE_TYPE, victim_vehicle_map()),
        ColumnRule::category(persons::INJURY, CategoryMap::new(INJURIES, UnmappedPolicy::Flag)),
        ColumnRule::category(
            persons::DEATH_LOCATION,
            CategoryMap::new(DEATH_LOCATIONS, UnmappedPolicy::PassThrough),
        ),
        ColumnRule::named(
            persons::TRAVEL_MODE,
            ColumnTransform::Derived {
                from: persons::VEHICLE_TYPE,
                pairs: TRAVEL_MODES,
            },
        ),
    ];

    RuleSet {
        kind: DatasetKind::Persons,
        rules,
        enrichment: None,
    }
}
