//! Retrieval of the Infosiga SP "dados abertos" archive.
//!
//! The archive is fetched with a blocking client under a bounded
//! retry policy, hashed while it streams to disk, and unpacked into a
//! temporary directory that disappears when the returned handle drops.

mod checksum;
mod config;
mod download;
mod error;
mod extract;

pub use checksum::compute_file_sha256;
pub use config::{DEFAULT_SOURCE_URL, FetchConfig, RetryPolicy};
pub use download::{
    ARCHIVE_FILE_NAME, DownloadProgress, DownloadedArchive, download_archive, format_bytes,
    with_retry,
};
pub use error::{FetchError, Result};
pub use extract::{ExtractedArchive, extract_archive, extract_bytes};
