//! Dataset kinds shipped in the Infosiga archive.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// One of the three tables published by Infosiga SP.
///
/// Each kind owns a file prefix inside the archive (`sinistros_2015-2021.csv`,
/// `pessoas_2022-2025.csv`, ...) and a fixed output schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    /// Incidents ("sinistros"): one row per road incident.
    Incidents,
    /// Persons ("pessoas"): one row per victim.
    Persons,
    /// Vehicles ("veiculos"): one row per vehicle involved.
    Vehicles,
}

impl DatasetKind {
    /// File name prefix used by the source archive.
    pub const fn prefix(&self) -> &'static str {
        match self {
            Self::Incidents => "sinistros",
            Self::Persons => "pessoas",
            Self::Vehicles => "veiculos",
        }
    }

    /// Human-readable label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Incidents => "Incidents",
            Self::Persons => "Persons",
            Self::Vehicles => "Vehicles",
        }
    }

    /// All kinds, in archive order.
    pub const fn all() -> &'static [DatasetKind] {
        &[Self::Incidents, Self::Persons, Self::Vehicles]
    }

    /// Name of the cleaned CSV written for this kind.
    pub fn output_file_name(&self) -> String {
        format!("{}.csv", self.prefix())
    }

    /// Returns true when `file_name` belongs to this kind.
    ///
    /// Matching is on the prefix, ignoring ASCII case.
    pub fn matches_file_name(&self, file_name: &str) -> bool {
        let prefix = self.prefix();
        file_name.len() >= prefix.len()
            && file_name.is_char_boundary(prefix.len())
            && file_name[..prefix.len()].eq_ignore_ascii_case(prefix)
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

impl FromStr for DatasetKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sinistros" | "incidents" => Ok(Self::Incidents),
            "pessoas" | "persons" => Ok(Self::Persons),
            "veiculos" | "vehicles" => Ok(Self::Vehicles),
            _ => Err(ModelError::UnknownKind(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_prefix_and_english_name() {
        assert_eq!("sinistros".parse(), Ok(DatasetKind::Incidents));
        assert_eq!("Persons".parse(), Ok(DatasetKind::Persons));
        assert_eq!(" VEICULOS ".parse(), Ok(DatasetKind::Vehicles));
        assert!("acidentes".parse::<DatasetKind>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for kind in DatasetKind::all() {
            assert_eq!(kind.to_string().parse::<DatasetKind>(), Ok(*kind));
        }
    }

    #[test]
    fn matches_file_names_by_prefix() {
        assert!(DatasetKind::Incidents.matches_file_name("sinistros_2022-2025.csv"));
        assert!(DatasetKind::Incidents.matches_file_name("SINISTROS.csv"));
        assert!(!DatasetKind::Incidents.matches_file_name("pessoas_2022.csv"));
        assert!(!DatasetKind::Vehicles.matches_file_name("veic.csv"));
    }
}
