use infosiga_model::DatasetKind;
use infosiga_model::columns::vehicles;

use super::VEHICLE_TYPES;
use crate::normalization::{CategoryMap, UnmappedPolicy};
use crate::types::{ColumnRule, ColumnTransform, RuleSet};

pub(super) fn rules() -> RuleSet {
    let rules = vec![
        ColumnRule::named(vehicles::ID, ColumnTransform::Text),
        ColumnRule::named(vehicles::VEHICLE_ID, ColumnTransform::Text),
        ColumnRule::named(vehicles::MANUFACTURE_YEAR, ColumnTransform::Integer),
        ColumnRule::named(vehicles::MODEL_YEAR, ColumnTransform::Integer),
        ColumnRule::named(vehicles::COLOR, ColumnTransform::Color),
        ColumnRule::category(
            vehicles::VEHICLE_TYPE,
            CategoryMap::new(VEHICLE_TYPES, UnmappedPolicy::Flag),
        ),
    ];

    RuleSet {
        kind: DatasetKind::Vehicles,
        rules,
        enrichment: None,
    }
}
