//! Decoding and parsing of one source CSV file.
//!
//! Infosiga publishes `;`-delimited Windows-1252 text. Files are read whole,
//! decoded to UTF-8 and parsed from memory with every column as `String`, so
//! no value is reinterpreted before the recoder sees it.

use std::fmt;
use std::io::Cursor;
use std::path::Path;

use encoding_rs::{UTF_8, WINDOWS_1252};
use polars::prelude::*;

use crate::error::{IngestError, Result};

/// Maximum size of one source file (2 GiB).
pub const MAX_CSV_FILE_SIZE: u64 = 2 * 1024 * 1024 * 1024;

const SEPARATOR: u8 = b';';

/// Character set a source file was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    /// Windows-1252, the published encoding.
    Windows1252,
    /// UTF-8, detected by BOM or strict validation.
    Utf8,
}

impl fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Windows1252 => f.write_str("windows-1252"),
            Self::Utf8 => f.write_str("utf-8"),
        }
    }
}

/// Check file size against [`MAX_CSV_FILE_SIZE`].
pub fn check_file_size(path: &Path) -> Result<u64> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<u64> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(metadata.len())
}

/// Decodes raw source bytes to UTF-8 text.
///
/// A UTF-8 BOM, or bytes that are valid UTF-8 as a whole, select UTF-8.
/// Everything else is decoded as Windows-1252, which maps every byte.
pub fn decode_source(bytes: &[u8]) -> (String, SourceEncoding) {
    if let Some((encoding, _)) = encoding_rs::Encoding::for_bom(bytes)
        && encoding == UTF_8
    {
        let (text, _) = UTF_8.decode_with_bom_removal(bytes);
        return (text.into_owned(), SourceEncoding::Utf8);
    }
    if let Ok(text) = std::str::from_utf8(bytes)
        && !text.is_ascii()
    {
        return (text.to_string(), SourceEncoding::Utf8);
    }
    let (text, _, _) = WINDOWS_1252.decode(bytes);
    (text.into_owned(), SourceEncoding::Windows1252)
}

/// Reads one source file into a string-typed DataFrame.
pub fn read_source_csv(path: &Path) -> Result<(DataFrame, SourceEncoding)> {
    let size = check_file_size(path)?;
    let bytes = std::fs::read(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let (text, encoding) = decode_source(&bytes);
    if text.trim().is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let df = parse_text(text, path)?;
    tracing::debug!(
        path = %path.display(),
        bytes = size,
        encoding = %encoding,
        rows = df.height(),
        columns = df.width(),
        "read source file"
    );
    Ok((df, encoding))
}

fn parse_text(text: String, path: &Path) -> Result<DataFrame> {
    let cursor = Cursor::new(text.into_bytes());
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|options| options.with_separator(SEPARATOR))
        .into_reader_with_file_handle(cursor)
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if df.width() == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    Ok(df)
}
