//! Infosiga SP source loading.
//!
//! Finds the CSV files of one dataset kind inside an extracted archive,
//! decodes them from Windows-1252 and stacks them into a single string-typed
//! Polars DataFrame.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use infosiga_ingest::load_dataset;
//! use infosiga_model::DatasetKind;
//!
//! let loaded = load_dataset(Path::new("extracted"), DatasetKind::Persons)?;
//! println!("{} rows from {} files", loaded.frame.height(), loaded.sources.len());
//! ```

mod csv;
mod discovery;
mod error;
mod loader;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{MAX_CSV_FILE_SIZE, SourceEncoding, check_file_size, decode_source, read_source_csv};

// === File Discovery ===
pub use discovery::{ARCHIVE_SUBDIRECTORY, discover_source_files, list_csv_files, resolve_source_dir};

// === Dataset Loading ===
pub use loader::{LoadedDataset, SourceFile, load_dataset};
