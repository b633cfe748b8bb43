//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use infosiga_model::DatasetKind;

#[derive(Parser)]
#[command(
    name = "infosiga",
    version,
    about = "Download and clean the Infosiga SP road-incident open data",
    long_about = "Download and clean the Infosiga SP road-incident open data.\n\n\
                  Reads the incidents (sinistros), persons (pessoas) and vehicles\n\
                  (veiculos) tables and writes typed, recoded CSV files."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Pipeline settings file (TOML).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Download the published archive, then load and clean it.
    Fetch(FetchArgs),

    /// Clean a local extract (directory or .zip archive).
    Clean(CleanArgs),

    /// List the dataset kinds and their output columns.
    Kinds,
}

#[derive(Args)]
pub struct FetchArgs {
    /// Archive URL (default: the official Infosiga SP download).
    #[arg(long = "url", value_name = "URL")]
    pub url: Option<String>,

    /// Attempts before giving up on the download.
    #[arg(long = "max-attempts", value_name = "N")]
    pub max_attempts: Option<u32>,

    #[command(flatten)]
    pub selection: Selection,
}

#[derive(Args)]
pub struct CleanArgs {
    /// Extracted directory or `.zip` archive.
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    #[command(flatten)]
    pub selection: Selection,
}

/// Options shared by `fetch` and `clean`.
#[derive(Args)]
pub struct Selection {
    /// Dataset kinds to process (default: all three).
    #[arg(long = "kind", value_enum, value_name = "KIND")]
    pub kinds: Vec<KindArg>,

    /// Write `<prefix>.csv` and a JSON quality report per kind here.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

/// CLI dataset kind choices.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    #[value(alias = "incidents")]
    Sinistros,
    #[value(alias = "persons")]
    Pessoas,
    #[value(alias = "vehicles")]
    Veiculos,
}

impl From<KindArg> for DatasetKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Sinistros => DatasetKind::Incidents,
            KindArg::Pessoas => DatasetKind::Persons,
            KindArg::Veiculos => DatasetKind::Vehicles,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
