//! Pipeline settings, optionally read from a TOML file.
//!
//! Every field has a default, so an empty file (or no file at all) is a
//! valid configuration. Command-line flags override what is loaded here.
//!
//! ```toml
//! output_dir = "cleaned"
//! kinds = ["incidents", "persons"]
//!
//! [download]
//! url = "https://infosiga.detran.sp.gov.br/rest/painel/download/file/dados_infosiga.zip"
//! timeout_secs = 300
//! max_attempts = 4
//! backoff_base_secs = 2
//! backoff_max_secs = 30
//!
//! [lookup]
//! registry = "reference/municipios.csv"
//! regions = "reference/regioes_administrativas.csv"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use infosiga_fetch::{DEFAULT_SOURCE_URL, FetchConfig, RetryPolicy};
use infosiga_model::DatasetKind;
use serde::{Deserialize, Serialize};

use crate::pipeline::ReferenceFiles;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Where cleaned CSV files go. Nothing is written when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    /// Kinds processed when none are named on the command line.
    pub kinds: Vec<DatasetKind>,
    pub download: DownloadSettings,
    pub lookup: LookupSettings,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            kinds: DatasetKind::all().to_vec(),
            download: DownloadSettings::default(),
            lookup: LookupSettings::default(),
        }
    }
}

impl PipelineConfig {
    /// Reads a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("parse config {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.lookup.reference_files()?;
        Ok(config)
    }

    /// Loads `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}

/// Remote archive and retry settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DownloadSettings {
    pub url: String,
    pub timeout_secs: u64,
    pub max_attempts: u32,
    pub backoff_base_secs: u64,
    pub backoff_max_secs: u64,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        let fetch = FetchConfig::default();
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            timeout_secs: fetch.timeout.as_secs(),
            max_attempts: fetch.retry.max_attempts,
            backoff_base_secs: fetch.retry.base_delay.as_secs(),
            backoff_max_secs: fetch.retry.max_delay.as_secs(),
        }
    }
}

impl DownloadSettings {
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            url: self.url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            retry: RetryPolicy::new(
                self.max_attempts,
                Duration::from_secs(self.backoff_base_secs),
                Duration::from_secs(self.backoff_max_secs),
            ),
        }
    }
}

/// Reference extracts replacing the bundled municipality lookup.
///
/// Both paths are set together or not at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LookupSettings {
    /// National municipality registry, `codigo_uf;sigla_uf;codigo_municipio;nome_municipio`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry: Option<PathBuf>,
    /// Region per municipality, `codigo_municipio;regiao_administrativa`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regions: Option<PathBuf>,
}

impl LookupSettings {
    /// `None` selects the bundled extracts.
    pub fn reference_files(&self) -> Result<Option<ReferenceFiles>> {
        match (&self.registry, &self.regions) {
            (None, None) => Ok(None),
            (Some(registry), Some(regions)) => Ok(Some(ReferenceFiles {
                registry: registry.clone(),
                regions: regions.clone(),
            })),
            _ => bail!("lookup.registry and lookup.regions must be set together"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(PipelineConfig::from_toml("").unwrap(), PipelineConfig::default());
    }

    #[test]
    fn test_defaults_match_fetch_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.download.fetch_config(), FetchConfig::default());
        assert_eq!(config.kinds.len(), 3);
    }

    #[test]
    fn test_partial_file() {
        let config = PipelineConfig::from_toml(
            "kinds = [\"persons\"]\noutput_dir = \"out\"\n\n[download]\nmax_attempts = 7\n",
        )
        .unwrap();
        assert_eq!(config.kinds, vec![DatasetKind::Persons]);
        assert_eq!(config.output_dir, Some(PathBuf::from("out")));
        assert_eq!(config.download.max_attempts, 7);
        assert_eq!(config.download.timeout_secs, 300);
        assert_eq!(config.download.url, DEFAULT_SOURCE_URL);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert!(PipelineConfig::from_toml("[download]\nretries = 3\n").is_err());
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = PipelineConfig::load(Path::new("/nonexistent/infosiga.toml")).unwrap_err();
        assert!(err.to_string().contains("infosiga.toml"));
    }

    #[test]
    fn test_lookup_paths() {
        let config = PipelineConfig::from_toml(
            "[lookup]\nregistry = \"ref/municipios.csv\"\nregions = \"ref/regioes.csv\"\n",
        )
        .unwrap();
        assert_eq!(
            config.lookup.reference_files().unwrap(),
            Some(ReferenceFiles {
                registry: PathBuf::from("ref/municipios.csv"),
                regions: PathBuf::from("ref/regioes.csv"),
            })
        );
        assert_eq!(PipelineConfig::default().lookup.reference_files().unwrap(), None);
    }

    #[test]
    fn test_lookup_paths_come_in_pairs() {
        let err = PipelineConfig::from_toml("[lookup]\nregistry = \"municipios.csv\"\n").unwrap_err();
        assert!(err.to_string().contains("set together"));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = PipelineConfig {
            output_dir: Some(PathBuf::from("cleaned")),
            lookup: LookupSettings {
                registry: Some(PathBuf::from("municipios.csv")),
                regions: Some(PathBuf::from("regioes.csv")),
            },
            ..PipelineConfig::default()
        };
        let text = toml::to_string(&config).unwrap();
        assert_eq!(PipelineConfig::from_toml(&text).unwrap(), config);
    }
}
