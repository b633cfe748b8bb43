//! Municipality lookup for incident enrichment.
//!
//! Entries are indexed three ways: by 7-digit IBGE code, by the legacy
//! 6-digit code (the IBGE code without its check digit) and by folded name.
//! Every key resolves to at most one entry, so a left join against the table
//! can never duplicate rows.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::io::Read;

use infosiga_common::{digits_only, fold_key};
use serde::Deserialize;

use crate::embedded;
use crate::error::{Result, StandardsError};

/// State whose municipalities are kept from the national registry.
pub const SOURCE_STATE: &str = "SP";

/// Former spellings still found in older extracts, keyed to the current
/// IBGE code.
const MUNICIPALITY_ALIASES: &[(&str, i64)] = &[
    ("Embu", 3_515_004),
    ("Moji das Cruzes", 3_530_607),
    ("Moji Guaçu", 3_530_706),
    ("Moji Mirim", 3_530_805),
    ("Brodósqui", 3_507_803),
    ("São Luís do Paraitinga", 3_550_001),
];

/// One municipality with its enrichment attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MunicipalityEntry {
    /// 7-digit IBGE code.
    pub ibge_code: i64,
    /// Official name as spelled in the registry.
    pub name: String,
    /// Administrative region, `None` when the region file has no row.
    pub administrative_region: Option<String>,
}

impl MunicipalityEntry {
    /// Legacy 6-digit code (IBGE code without the check digit).
    pub const fn legacy_code(&self) -> i64 {
        self.ibge_code / 10
    }
}

#[derive(Debug, Deserialize)]
struct RegistryRow {
    #[serde(rename = "sigla_uf")]
    state: String,
    #[serde(rename = "codigo_municipio")]
    code: String,
    #[serde(rename = "nome_municipio")]
    name: String,
}

#[derive(Debug, Deserialize)]
struct RegionRow {
    #[serde(rename = "codigo_municipio")]
    code: String,
    #[serde(rename = "regiao_administrativa")]
    region: String,
}

/// Immutable municipality index.
#[derive(Debug, Clone, Default)]
pub struct LookupTable {
    entries: Vec<MunicipalityEntry>,
    by_code: HashMap<i64, usize>,
    by_legacy_code: HashMap<i64, usize>,
    by_name: HashMap<String, usize>,
}

impl LookupTable {
    /// Builds the table from the bundled reference extracts.
    pub fn embedded() -> Result<Self> {
        let registry = read_registry(
            embedded::MUNICIPALITY_REGISTRY.as_bytes(),
            embedded::MUNICIPALITY_REGISTRY_FILE,
        )?;
        let regions = read_regions(
            embedded::ADMINISTRATIVE_REGIONS.as_bytes(),
            embedded::ADMINISTRATIVE_REGIONS_FILE,
        )?;
        let table = Self::from_parts(registry, regions)?;
        tracing::debug!(municipalities = table.len(), "loaded embedded municipality lookup");
        Ok(table)
    }

    /// Builds the table from semicolon-delimited registry and region sources.
    ///
    /// Only registry rows for [`SOURCE_STATE`] are kept.
    pub fn from_readers<R1: Read, R2: Read>(registry: R1, regions: R2) -> Result<Self> {
        let registry = read_registry(registry, "registry")?;
        let regions = read_regions(regions, "regions")?;
        Self::from_parts(registry, regions)
    }

    /// Builds the table from ready-made entries.
    ///
    /// Fails with [`StandardsError::JoinFanOut`] when two entries share a code,
    /// a legacy code or a folded name.
    pub fn from_entries(entries: Vec<MunicipalityEntry>) -> Result<Self> {
        let mut table = Self::default();
        for entry in entries {
            table.insert(entry)?;
        }
        Ok(table)
    }

    fn from_parts(registry: Vec<(i64, String)>, regions: Vec<(i64, String)>) -> Result<Self> {
        if registry.is_empty() {
            return Err(StandardsError::EmptyRegistry {
                state: SOURCE_STATE.to_string(),
            });
        }

        let mut region_by_code: HashMap<i64, String> = HashMap::new();
        for (code, region) in regions {
            match region_by_code.entry(code) {
                Entry::Occupied(_) => {
                    return Err(StandardsError::JoinFanOut {
                        key: code.to_string(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(region);
                }
            }
        }

        let mut table = Self::default();
        for (code, name) in registry {
            let administrative_region = region_by_code.remove(&code);
            table.insert(MunicipalityEntry {
                ibge_code: code,
                name,
                administrative_region,
            })?;
        }

        for code in region_by_code.keys() {
            tracing::warn!(code = %code, "region row references unknown municipality, skipped");
        }

        table.insert_aliases(MUNICIPALITY_ALIASES)?;
        Ok(table)
    }

    fn insert(&mut self, entry: MunicipalityEntry) -> Result<()> {
        let index = self.entries.len();
        let name_key = fold_key(&entry.name);

        if self.by_code.contains_key(&entry.ibge_code) {
            return Err(StandardsError::JoinFanOut {
                key: entry.ibge_code.to_string(),
            });
        }
        if self.by_legacy_code.contains_key(&entry.legacy_code()) {
            return Err(StandardsError::JoinFanOut {
                key: entry.legacy_code().to_string(),
            });
        }
        if self.by_name.contains_key(&name_key) {
            return Err(StandardsError::JoinFanOut { key: name_key });
        }

        self.by_code.insert(entry.ibge_code, index);
        self.by_legacy_code.insert(entry.legacy_code(), index);
        self.by_name.insert(name_key, index);
        self.entries.push(entry);
        Ok(())
    }

    /// Adds extra name keys for entries already in the table.
    ///
    /// Aliases pointing at a code outside the table are ignored. An alias
    /// that folds to an existing name is a fan-out.
    fn insert_aliases(&mut self, aliases: &[(&str, i64)]) -> Result<()> {
        for (alias, code) in aliases {
            let Some(&index) = self.by_code.get(code) else {
                continue;
            };
            match self.by_name.entry(fold_key(alias)) {
                Entry::Occupied(slot) if *slot.get() == index => {}
                Entry::Occupied(slot) => {
                    return Err(StandardsError::JoinFanOut {
                        key: slot.key().clone(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(index);
                }
            }
        }
        Ok(())
    }

    /// Finds a municipality by 7-digit IBGE or 6-digit legacy code.
    ///
    /// Separators are ignored (`"35.503-08"` works). Other lengths never
    /// match.
    pub fn find_by_code(&self, code: &str) -> Option<&MunicipalityEntry> {
        let digits = digits_only(code);
        let number = digits.parse::<i64>().ok()?;
        let index = match digits.len() {
            7 => self.by_code.get(&number),
            6 => self.by_legacy_code.get(&number),
            _ => None,
        }?;
        self.entries.get(*index)
    }

    /// Finds a municipality by name, ignoring case, accents and spacing.
    pub fn find_by_name(&self, name: &str) -> Option<&MunicipalityEntry> {
        let index = self.by_name.get(&fold_key(name))?;
        self.entries.get(*index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in registry order.
    pub fn entries(&self) -> &[MunicipalityEntry] {
        &self.entries
    }
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b';')
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn parse_code(raw: &str, file: &str) -> Result<i64> {
    let digits = digits_only(raw);
    if digits.len() != 7 {
        return Err(StandardsError::InvalidValue {
            field: "codigo_municipio",
            value: raw.to_string(),
            file: file.to_string(),
        });
    }
    digits
        .parse::<i64>()
        .map_err(|_| StandardsError::InvalidValue {
            field: "codigo_municipio",
            value: raw.to_string(),
            file: file.to_string(),
        })
}

fn read_registry<R: Read>(reader: R, file: &str) -> Result<Vec<(i64, String)>> {
    let mut rows = Vec::new();
    for result in csv_reader(reader).deserialize::<RegistryRow>() {
        let row = result.map_err(|e| StandardsError::CsvParse {
            file: file.to_string(),
            message: e.to_string(),
        })?;
        if !row.state.eq_ignore_ascii_case(SOURCE_STATE) {
            continue;
        }
        rows.push((parse_code(&row.code, file)?, row.name));
    }
    Ok(rows)
}

fn read_regions<R: Read>(reader: R, file: &str) -> Result<Vec<(i64, String)>> {
    let mut rows = Vec::new();
    for result in csv_reader(reader).deserialize::<RegionRow>() {
        let row = result.map_err(|e| StandardsError::CsvParse {
            file: file.to_string(),
            message: e.to_string(),
        })?;
        if row.region.is_empty() {
            continue;
        }
        rows.push((parse_code(&row.code, file)?, row.region));
    }
    Ok(rows)
}
