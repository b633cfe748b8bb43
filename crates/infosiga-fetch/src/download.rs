//! Blocking archive download with retry, progress and hashing.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::Client;
use sha2::{Digest, Sha256};
use tempfile::TempDir;
use tracing::{debug, info, warn};

use crate::checksum::BUFFER_SIZE;
use crate::config::{FetchConfig, RetryPolicy};
use crate::error::{FetchError, Result};

/// User agent string for download requests.
const USER_AGENT_VALUE: &str = concat!("infosiga-sp/", env!("CARGO_PKG_VERSION"));

/// File name the archive is stored under inside its temporary directory.
pub const ARCHIVE_FILE_NAME: &str = "dados_infosiga.zip";

/// Progress information during a download operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadProgress {
    /// Number of bytes received so far.
    pub downloaded: u64,
    /// Content length announced by the server, if any.
    pub total: Option<u64>,
}

impl DownloadProgress {
    #[must_use]
    pub fn new(downloaded: u64, total: Option<u64>) -> Self {
        Self { downloaded, total }
    }

    /// Progress as a fraction (0.0 to 1.0), when the total is known.
    #[must_use]
    pub fn fraction(&self) -> Option<f32> {
        match self.total {
            Some(total) if total > 0 => Some((self.downloaded as f64 / total as f64) as f32),
            _ => None,
        }
    }

    /// Progress as a percentage (0 to 100), when the total is known.
    #[must_use]
    pub fn percentage(&self) -> Option<u8> {
        self.fraction()
            .map(|fraction| (fraction * 100.0).min(100.0) as u8)
    }

    /// Formats the downloaded amount in human-readable form.
    #[must_use]
    pub fn downloaded_display(&self) -> String {
        format_bytes(self.downloaded)
    }
}

/// Formats a byte count in human-readable form.
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

/// A downloaded archive, deleted together with its directory on drop.
#[derive(Debug)]
pub struct DownloadedArchive {
    dir: TempDir,
    path: PathBuf,
    size: u64,
    sha256: String,
    attempts: u32,
}

impl DownloadedArchive {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the archive.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Lowercase hex SHA-256 of the archive bytes.
    pub fn sha256(&self) -> &str {
        &self.sha256
    }

    /// Attempts it took, including the successful one.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

/// Runs `operation` until it succeeds, fails permanently, or the policy
/// runs out of attempts.
///
/// `operation` receives the 1-based attempt number. `sleep` is called with
/// each backoff delay. Any final failure is reported as
/// [`FetchError::DownloadFailed`].
pub fn with_retry<T, F, S>(url: &str, policy: &RetryPolicy, mut operation: F, mut sleep: S) -> Result<T>
where
    F: FnMut(u32) -> Result<T>,
    S: FnMut(Duration),
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match operation(attempt) {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt < max_attempts => {
                let delay = policy.delay_for(attempt);
                warn!(
                    url,
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "download attempt failed, retrying"
                );
                sleep(delay);
                attempt += 1;
            }
            Err(err) => {
                return Err(FetchError::DownloadFailed {
                    url: url.to_string(),
                    attempts: attempt,
                    reason: err.to_string(),
                });
            }
        }
    }
}

/// Downloads the archive named by `config` into a fresh temporary directory.
///
/// `on_progress` is called after every chunk. A retried attempt starts the
/// file over, so progress may go back to zero.
pub fn download_archive<F>(config: &FetchConfig, mut on_progress: F) -> Result<DownloadedArchive>
where
    F: FnMut(DownloadProgress),
{
    info!(url = %config.url, max_attempts = config.retry.max_attempts, "downloading archive");

    let client = Client::builder()
        .timeout(config.timeout)
        .user_agent(USER_AGENT_VALUE)
        .build()?;
    let dir = tempfile::tempdir()?;
    let path = dir.path().join(ARCHIVE_FILE_NAME);

    let ((size, sha256), attempts) = with_retry(
        &config.url,
        &config.retry,
        |attempt| {
            fetch_once(&client, &config.url, &path, &mut on_progress).map(|result| (result, attempt))
        },
        std::thread::sleep,
    )?;

    info!(
        url = %config.url,
        size = %format_bytes(size),
        sha256 = %sha256,
        attempts,
        "archive downloaded"
    );

    Ok(DownloadedArchive {
        dir,
        path,
        size,
        sha256,
        attempts,
    })
}

fn fetch_once<F>(client: &Client, url: &str, dest: &Path, on_progress: &mut F) -> Result<(u64, String)>
where
    F: FnMut(DownloadProgress),
{
    debug!(url, "requesting archive");
    let mut response = client.get(url).send()?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus {
            status: status.as_u16(),
        });
    }

    let total = response.content_length();
    let mut file = BufWriter::new(File::create(dest)?);
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; BUFFER_SIZE];
    let mut downloaded = 0u64;

    loop {
        let bytes_read = response.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
        file.write_all(&buffer[..bytes_read])?;
        downloaded += bytes_read as u64;
        on_progress(DownloadProgress::new(downloaded, total));
    }
    file.flush()?;

    Ok((downloaded, hex::encode(hasher.finalize())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_fraction() {
        let progress = DownloadProgress::new(50, Some(200));
        assert_eq!(progress.fraction(), Some(0.25));
        assert_eq!(progress.percentage(), Some(25));
        assert_eq!(DownloadProgress::new(10, None).percentage(), None);
        assert_eq!(DownloadProgress::new(10, Some(0)).fraction(), None);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.0 GB");
    }

    #[test]
    fn test_user_agent_names_crate_version() {
        assert!(USER_AGENT_VALUE.starts_with("infosiga-sp/"));
        assert!(USER_AGENT_VALUE.ends_with(env!("CARGO_PKG_VERSION")));
    }
}
