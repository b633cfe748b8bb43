//! Embedded reference extracts.
//!
//! Both files are semicolon-delimited UTF-8 and compiled in with
//! `include_str!()`.

/// Extract of the IBGE national municipality registry.
///
/// Columns: `codigo_uf;sigla_uf;codigo_municipio;nome_municipio`.
pub const MUNICIPALITY_REGISTRY: &str = include_str!("../data/municipios.csv");

/// File name reported in errors for [`MUNICIPALITY_REGISTRY`].
pub const MUNICIPALITY_REGISTRY_FILE: &str = "municipios.csv";

/// Administrative region of each São Paulo municipality.
///
/// Columns: `codigo_municipio;regiao_administrativa`.
pub const ADMINISTRATIVE_REGIONS: &str = include_str!("../data/regioes_administrativas.csv");

/// File name reported in errors for [`ADMINISTRATIVE_REGIONS`].
pub const ADMINISTRATIVE_REGIONS_FILE: &str = "regioes_administrativas.csv";
