//! End-to-end pipeline with explicit stages.
//!
//! 1. **Acquire**: download the archive, or open a local directory or `.zip`
//! 2. **Load**: find and stack the CSV files of each requested kind
//! 3. **Clean**: apply the kind's rule set against the municipality lookup
//! 4. **Output**: write the cleaned CSV and a JSON quality report per kind
//!
//! Temporary files from stage 1 live until the pipeline returns.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use infosiga_fetch::{
    DownloadProgress, DownloadedArchive, ExtractedArchive, FetchConfig, compute_file_sha256,
    download_archive, extract_archive,
};
use infosiga_ingest::load_dataset;
use infosiga_model::{DatasetKind, QualityReport};
use infosiga_normalization::{CleanedTable, clean};
use infosiga_standards::LookupTable;
use polars::prelude::*;
use tracing::{debug, info, info_span};

/// Where the raw data comes from.
#[derive(Debug, Clone)]
pub enum Source {
    /// Download the published archive.
    Remote(FetchConfig),
    /// An extracted directory or a `.zip` archive on disk.
    Local(PathBuf),
}

impl Source {
    pub fn describe(&self) -> String {
        match self {
            Self::Remote(config) => config.url.clone(),
            Self::Local(path) => path.display().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    /// Kinds to process, in order. Empty means all three.
    pub kinds: Vec<DatasetKind>,
    /// Nothing is written when unset.
    pub output_dir: Option<PathBuf>,
    /// Lookup extracts to use instead of the bundled ones.
    pub reference: Option<ReferenceFiles>,
}

/// Registry and region files for [`LookupTable::from_readers`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceFiles {
    pub registry: PathBuf,
    pub regions: PathBuf,
}

/// Files written for one kind.
#[derive(Debug, Clone)]
pub struct KindOutputs {
    pub table: PathBuf,
    pub report: PathBuf,
}

/// Outcome of processing one kind.
#[derive(Debug, Clone)]
pub struct KindSummary {
    pub kind: DatasetKind,
    pub files: usize,
    pub rows: usize,
    pub columns: usize,
    pub report: QualityReport,
    pub outputs: Option<KindOutputs>,
}

#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub source: String,
    /// SHA-256 of the archive, when the source was one.
    pub archive_sha256: Option<String>,
    pub kinds: Vec<KindSummary>,
}

impl PipelineResult {
    pub fn total_rows(&self) -> usize {
        self.kinds.iter().map(|summary| summary.rows).sum()
    }

    pub fn total_issues(&self) -> u64 {
        self.kinds
            .iter()
            .map(|summary| summary.report.total_count())
            .sum()
    }
}

// ============================================================================
// Stage 1: Acquire
// ============================================================================

/// Keeps temporary directories alive while the pipeline reads from them.
enum Workspace {
    Downloaded {
        _archive: DownloadedArchive,
        extracted: ExtractedArchive,
    },
    Extracted(ExtractedArchive),
    Directory(PathBuf),
}

impl Workspace {
    fn root(&self) -> &Path {
        match self {
            Self::Downloaded { extracted, .. } | Self::Extracted(extracted) => extracted.path(),
            Self::Directory(path) => path,
        }
    }
}

fn is_zip(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
}

fn acquire<F>(source: &Source, on_progress: F) -> Result<(Workspace, Option<String>)>
where
    F: FnMut(DownloadProgress),
{
    match source {
        Source::Remote(config) => {
            let archive = download_archive(config, on_progress).context("download archive")?;
            let sha256 = archive.sha256().to_string();
            let extracted = extract_archive(archive.path()).context("extract archive")?;
            Ok((
                Workspace::Downloaded {
                    _archive: archive,
                    extracted,
                },
                Some(sha256),
            ))
        }
        Source::Local(path) if path.is_dir() => Ok((Workspace::Directory(path.clone()), None)),
        Source::Local(path) if path.is_file() && is_zip(path) => {
            let sha256 = compute_file_sha256(path)
                .with_context(|| format!("hash archive {}", path.display()))?;
            info!(path = %path.display(), sha256 = %sha256, "using local archive");
            let extracted = extract_archive(path)
                .with_context(|| format!("extract archive {}", path.display()))?;
            Ok((Workspace::Extracted(extracted), Some(sha256)))
        }
        Source::Local(path) if path.exists() => {
            bail!("{} is neither a directory nor a .zip archive", path.display())
        }
        Source::Local(path) => bail!("source not found: {}", path.display()),
    }
}

// ============================================================================
// Stages 2-4: Load, Clean, Output
// ============================================================================

/// Runs every stage for the requested kinds.
///
/// `on_progress` only fires for [`Source::Remote`].
pub fn run_pipeline<F>(source: &Source, options: &PipelineOptions, on_progress: F) -> Result<PipelineResult>
where
    F: FnMut(DownloadProgress),
{
    let kinds = if options.kinds.is_empty() {
        DatasetKind::all().to_vec()
    } else {
        options.kinds.clone()
    };

    let lookup = load_lookup(options.reference.as_ref())?;
    let (workspace, archive_sha256) = acquire(source, on_progress)?;
    debug!(root = %workspace.root().display(), "reading sources");

    let mut summaries = Vec::with_capacity(kinds.len());
    for kind in kinds {
        summaries.push(process_kind(
            workspace.root(),
            kind,
            &lookup,
            options.output_dir.as_deref(),
        )?);
    }

    Ok(PipelineResult {
        source: source.describe(),
        archive_sha256,
        kinds: summaries,
    })
}

fn load_lookup(reference: Option<&ReferenceFiles>) -> Result<LookupTable> {
    let Some(files) = reference else {
        return LookupTable::embedded().context("load municipality lookup");
    };
    let registry = File::open(&files.registry)
        .with_context(|| format!("open registry {}", files.registry.display()))?;
    let regions = File::open(&files.regions)
        .with_context(|| format!("open regions {}", files.regions.display()))?;
    let lookup = LookupTable::from_readers(BufReader::new(registry), BufReader::new(regions))
        .with_context(|| format!("load municipality lookup from {}", files.registry.display()))?;
    info!(
        municipalities = lookup.len(),
        registry = %files.registry.display(),
        "loaded municipality lookup"
    );
    Ok(lookup)
}

fn process_kind(
    root: &Path,
    kind: DatasetKind,
    lookup: &LookupTable,
    output_dir: Option<&Path>,
) -> Result<KindSummary> {
    let span = info_span!("kind", kind = %kind);
    let _guard = span.enter();
    let start = Instant::now();

    let loaded = load_dataset(root, kind).with_context(|| format!("load {kind} files"))?;
    let cleaned = clean(&loaded.frame, kind, lookup).with_context(|| format!("clean {kind}"))?;

    let outputs = match output_dir {
        Some(dir) => Some(write_outputs(dir, &cleaned)?),
        None => None,
    };

    info!(
        files = loaded.sources.len(),
        rows = cleaned.height(),
        columns = cleaned.width(),
        issues = cleaned.report.total_count(),
        duration_ms = start.elapsed().as_millis(),
        "kind complete"
    );

    Ok(KindSummary {
        kind,
        files: loaded.sources.len(),
        rows: cleaned.height(),
        columns: cleaned.width(),
        report: cleaned.report,
        outputs,
    })
}

fn write_outputs(dir: &Path, cleaned: &CleanedTable) -> Result<KindOutputs> {
    fs::create_dir_all(dir).with_context(|| format!("create output dir {}", dir.display()))?;

    let table = dir.join(cleaned.kind.output_file_name());
    write_csv(&cleaned.frame, &table)?;

    let report = dir.join(format!("{}_report.json", cleaned.kind.prefix()));
    let json = serde_json::to_string_pretty(&cleaned.report).context("serialize quality report")?;
    fs::write(&report, json).with_context(|| format!("write {}", report.display()))?;

    info!(table = %table.display(), report = %report.display(), "outputs written");
    Ok(KindOutputs { table, report })
}

/// Writes `frame` as comma-separated UTF-8 with a header row.
///
/// Ordered categories are written as their labels.
pub fn write_csv(frame: &DataFrame, path: &Path) -> Result<()> {
    let columns = frame
        .get_columns()
        .iter()
        .map(|column| {
            if matches!(column.dtype(), DataType::Enum(..) | DataType::Categorical(..)) {
                column.cast(&DataType::String)
            } else {
                Ok(column.clone())
            }
        })
        .collect::<PolarsResult<Vec<Column>>>()?;
    let mut export = DataFrame::new(columns)?;

    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    CsvWriter::new(BufWriter::new(file))
        .include_header(true)
        .finish(&mut export)
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
