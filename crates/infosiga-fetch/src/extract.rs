//! Scoped ZIP extraction.

use std::fs::{self, File};
use std::io::{self, BufReader, Cursor, Read, Seek};
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, info};

use crate::error::{FetchError, Result};

/// Contents of an archive unpacked into a temporary directory.
///
/// The directory and everything in it is removed when this value drops.
#[derive(Debug)]
pub struct ExtractedArchive {
    dir: TempDir,
    files: Vec<PathBuf>,
}

impl ExtractedArchive {
    /// Root of the extracted tree.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Every extracted regular file, in archive order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }
}

/// Extracts the ZIP archive at `path`.
pub fn extract_archive(path: &Path) -> Result<ExtractedArchive> {
    debug!(path = %path.display(), "extracting archive");
    let file = File::open(path)
        .map_err(|e| FetchError::extraction(format!("failed to open {}: {e}", path.display())))?;
    extract_from(BufReader::new(file))
}

/// Extracts a ZIP archive held in memory.
pub fn extract_bytes(data: &[u8]) -> Result<ExtractedArchive> {
    extract_from(Cursor::new(data))
}

fn extract_from<R: Read + Seek>(reader: R) -> Result<ExtractedArchive> {
    let dir = tempfile::tempdir()
        .map_err(|e| FetchError::extraction(format!("failed to create temp dir: {e}")))?;
    let mut archive = zip::ZipArchive::new(reader)?;
    let mut files = Vec::with_capacity(archive.len());

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let Some(relative) = entry.enclosed_name() else {
            return Err(FetchError::extraction(format!(
                "unsafe entry path: {}",
                entry.name()
            )));
        };
        let dest = dir.path().join(&relative);

        if entry.is_dir() {
            fs::create_dir_all(&dest).map_err(|e| write_error(&dest, &e))?;
            continue;
        }
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| write_error(parent, &e))?;
        }

        let mut out = File::create(&dest).map_err(|e| write_error(&dest, &e))?;
        io::copy(&mut entry, &mut out).map_err(|e| write_error(&dest, &e))?;
        debug!(entry = %relative.display(), size = entry.size(), "extracted entry");
        files.push(dest);
    }

    info!(
        files = files.len(),
        path = %dir.path().display(),
        "archive extracted"
    );
    Ok(ExtractedArchive { dir, files })
}

fn write_error(path: &Path, err: &io::Error) -> FetchError {
    FetchError::extraction(format!("failed to write {}: {err}", path.display()))
}
