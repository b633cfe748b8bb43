//! Fixed cleaning rules for each dataset kind.
//!
//! The tables here are domain knowledge of the Infosiga SP extract. Each
//! kind owns one [`RuleSet`]; the executor never branches on the kind.

mod incidents;
mod persons;
mod vehicles;

use infosiga_model::DatasetKind;

use crate::types::RuleSet;

/// Vehicle categories shared by `tipo_veiculo_vitima` and `tipo_veiculo`.
const VEHICLE_TYPES: &[(&str, &str)] = &[
    ("MOTOCICLETA", "Motocicleta"),
    ("AUTOMOVEL", "Automóvel"),
    ("BICICLETA", "Bicicleta"),
    ("CAMINHAO", "Caminhão"),
    ("ONIBUS", "Ônibus"),
    ("OUTROS", "Outros"),
];

/// Returns the rule set for `kind`.
pub fn rule_set(kind: DatasetKind) -> RuleSet {
    match kind {
        DatasetKind::Incidents => incidents::rules(),
        DatasetKind::Persons => persons::rules(),
        DatasetKind::Vehicles => vehicles::rules(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ColumnSelector, ColumnTransform};

    #[test]
    fn every_kind_has_rules_for_its_kind() {
        for kind in DatasetKind::all() {
            let rules = rule_set(*kind);
            assert_eq!(rules.kind, *kind);
            assert!(!rules.rules.is_empty());
        }
    }

    #[test]
    fn only_incidents_are_enriched() {
        assert!(rule_set(DatasetKind::Incidents).enrichment.is_some());
        assert!(rule_set(DatasetKind::Persons).enrichment.is_none());
        assert!(rule_set(DatasetKind::Vehicles).enrichment.is_none());
    }

    #[test]
    fn derived_rules_follow_their_source() {
        for kind in DatasetKind::all() {
            let rules = rule_set(*kind).rules;
            for (index, rule) in rules.iter().enumerate() {
                if let ColumnTransform::Derived { from, .. } = rule.transform {
                    let source = rules
                        .iter()
                        .position(|r| r.selector == ColumnSelector::Named(from))
                        .expect("derived source has a rule");
                    assert!(source < index);
                }
            }
        }
    }
}
