use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use infosiga_fetch::{DownloadProgress, FetchConfig};
use infosiga_model::DatasetKind;
use tracing::info_span;

use infosiga_cli::config::PipelineConfig;
use infosiga_cli::pipeline::{PipelineOptions, PipelineResult, Source, run_pipeline};
use infosiga_cli::summary::kinds_table;

use crate::cli::{CleanArgs, FetchArgs, Selection};

const DOWNLOAD_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}) {msg}";

pub fn run_kinds() -> Result<()> {
    println!("{}", kinds_table());
    Ok(())
}

pub fn run_fetch(args: &FetchArgs, config: &PipelineConfig) -> Result<PipelineResult> {
    let mut fetch = config.download.fetch_config();
    if let Some(url) = &args.url {
        fetch.url.clone_from(url);
    }
    if let Some(max_attempts) = args.max_attempts {
        fetch.retry.max_attempts = max_attempts.max(1);
    }
    let options = pipeline_options(&args.selection, config)?;

    let span = info_span!("fetch", url = %fetch.url);
    let _guard = span.enter();
    let progress = download_bar(&fetch)?;
    let result = run_pipeline(&Source::Remote(fetch), &options, |update: DownloadProgress| {
        if let Some(total) = update.total {
            progress.set_length(total);
        }
        progress.set_position(update.downloaded);
    });
    progress.finish_and_clear();
    result
}

pub fn run_clean(args: &CleanArgs, config: &PipelineConfig) -> Result<PipelineResult> {
    let options = pipeline_options(&args.selection, config)?;
    let span = info_span!("clean", source = %args.source.display());
    let _guard = span.enter();
    run_pipeline(&Source::Local(args.source.clone()), &options, |_| {})
}

/// Command-line selection wins over the config file.
fn pipeline_options(selection: &Selection, config: &PipelineConfig) -> Result<PipelineOptions> {
    let kinds: Vec<DatasetKind> = if selection.kinds.is_empty() {
        config.kinds.clone()
    } else {
        selection.kinds.iter().copied().map(Into::into).collect()
    };
    Ok(PipelineOptions {
        kinds: dedupe(kinds),
        output_dir: selection
            .output_dir
            .clone()
            .or_else(|| config.output_dir.clone()),
        reference: config.lookup.reference_files()?,
    })
}

fn dedupe(kinds: Vec<DatasetKind>) -> Vec<DatasetKind> {
    let mut seen = Vec::with_capacity(kinds.len());
    for kind in kinds {
        if !seen.contains(&kind) {
            seen.push(kind);
        }
    }
    seen
}

fn download_bar(fetch: &FetchConfig) -> Result<ProgressBar> {
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template(DOWNLOAD_TEMPLATE)
            .context("progress bar template")?
            .progress_chars("#>-"),
    );
    bar.set_message(fetch.url.clone());
    Ok(bar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::KindArg;
    use infosiga_cli::config::LookupSettings;
    use std::path::PathBuf;

    #[test]
    fn test_flags_override_config() {
        let config = PipelineConfig {
            output_dir: Some(PathBuf::from("from-config")),
            kinds: vec![DatasetKind::Vehicles],
            ..PipelineConfig::default()
        };
        let selection = Selection {
            kinds: vec![KindArg::Pessoas, KindArg::Sinistros, KindArg::Pessoas],
            output_dir: Some(PathBuf::from("from-flag")),
        };

        let options = pipeline_options(&selection, &config).unwrap();
        assert_eq!(options.kinds, vec![DatasetKind::Persons, DatasetKind::Incidents]);
        assert_eq!(options.output_dir, Some(PathBuf::from("from-flag")));
    }

    #[test]
    fn test_config_fills_gaps() {
        let config = PipelineConfig {
            output_dir: Some(PathBuf::from("from-config")),
            kinds: vec![DatasetKind::Vehicles],
            ..PipelineConfig::default()
        };
        let selection = Selection {
            kinds: Vec::new(),
            output_dir: None,
        };

        let options = pipeline_options(&selection, &config).unwrap();
        assert_eq!(options.kinds, vec![DatasetKind::Vehicles]);
        assert_eq!(options.output_dir, Some(PathBuf::from("from-config")));
        assert_eq!(options.reference, None);
    }

    #[test]
    fn test_lookup_files_come_from_config() {
        let config = PipelineConfig {
            lookup: LookupSettings {
                registry: Some(PathBuf::from("municipios.csv")),
                regions: Some(PathBuf::from("regioes.csv")),
            },
            ..PipelineConfig::default()
        };
        let selection = Selection {
            kinds: Vec::new(),
            output_dir: None,
        };

        let options = pipeline_options(&selection, &config).unwrap();
        let reference = options.reference.unwrap();
        assert_eq!(reference.registry, PathBuf::from("municipios.csv"));
        assert_eq!(reference.regions, PathBuf::from("regioes.csv"));
    }
}
