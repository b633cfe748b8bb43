//! Loading every source file of one dataset kind into one frame.

use std::path::{Path, PathBuf};

use infosiga_model::DatasetKind;
use polars::prelude::*;

use crate::csv::{SourceEncoding, read_source_csv};
use crate::discovery::discover_source_files;
use crate::error::{IngestError, Result};

/// One file that contributed rows to a [`LoadedDataset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub rows: usize,
    pub encoding: SourceEncoding,
}

/// Raw rows of one kind, stacked in file-name order.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub kind: DatasetKind,
    /// Every column is `String`; empty fields are null.
    pub frame: DataFrame,
    pub sources: Vec<SourceFile>,
}

impl LoadedDataset {
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn column_names(&self) -> Vec<String> {
        header_of(&self.frame)
    }
}

/// Loads all files of `kind` found under `root`.
///
/// Files must share one header. Any failure aborts the load; no partial
/// frame is returned.
pub fn load_dataset(root: &Path, kind: DatasetKind) -> Result<LoadedDataset> {
    let files = discover_source_files(root, kind)?;

    let mut frame: Option<DataFrame> = None;
    let mut expected: Vec<String> = Vec::new();
    let mut sources = Vec::with_capacity(files.len());

    for path in files {
        let (df, encoding) = read_source_csv(&path)?;
        let found = header_of(&df);

        match frame.as_mut() {
            None => {
                expected = found;
                frame = Some(df.clone());
            }
            Some(stacked) => {
                if found != expected {
                    return Err(IngestError::SchemaMismatch {
                        path,
                        expected,
                        found,
                    });
                }
                stacked.vstack_mut(&df)?;
            }
        }

        sources.push(SourceFile {
            path,
            rows: df.height(),
            encoding,
        });
    }

    let mut frame = frame.ok_or_else(|| IngestError::NoFilesFound {
        kind,
        path: root.to_path_buf(),
    })?;
    frame.align_chunks_par();

    tracing::info!(
        kind = %kind,
        files = sources.len(),
        rows = frame.height(),
        columns = frame.width(),
        "loaded source dataset"
    );

    Ok(LoadedDataset {
        kind,
        frame,
        sources,
    })
}

fn header_of(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(ToString::to_string)
        .collect()
}
