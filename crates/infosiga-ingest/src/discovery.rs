//! Source file discovery inside an extracted archive.

use std::path::{Path, PathBuf};

use infosiga_model::DatasetKind;

use crate::error::{IngestError, Result};

/// Directory the published archive unpacks its CSV files into.
pub const ARCHIVE_SUBDIRECTORY: &str = "dados_infosiga";

/// Returns the directory that actually holds the CSV files.
///
/// Descends into [`ARCHIVE_SUBDIRECTORY`] when `root` contains it.
pub fn resolve_source_dir(root: &Path) -> Result<PathBuf> {
    if !root.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }
    let nested = root.join(ARCHIVE_SUBDIRECTORY);
    if nested.is_dir() {
        tracing::debug!(path = %nested.display(), "descending into archive subdirectory");
        Ok(nested)
    } else {
        Ok(root.to_path_buf())
    }
}

/// Lists all CSV files in a directory.
///
/// Returns files sorted by filename.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Finds the CSV files of one kind under `root`, sorted by name.
///
/// Fails with [`IngestError::NoFilesFound`] when nothing matches.
pub fn discover_source_files(root: &Path, kind: DatasetKind) -> Result<Vec<PathBuf>> {
    let dir = resolve_source_dir(root)?;
    let files: Vec<PathBuf> = list_csv_files(&dir)?
        .into_iter()
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| kind.matches_file_name(name))
        })
        .collect();

    if files.is_empty() {
        return Err(IngestError::NoFilesFound { kind, path: dir });
    }

    tracing::debug!(kind = %kind, count = files.len(), "discovered source files");
    Ok(files)
}
