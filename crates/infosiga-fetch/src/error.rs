//! Error types for archive retrieval.

use thiserror::Error;

/// Errors that can occur while downloading or unpacking the archive.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    /// Every attempt failed, or the last one ended with a non-success status.
    #[error("download of {url} failed after {attempts} attempt(s): {reason}")]
    DownloadFailed {
        url: String,
        attempts: u32,
        reason: String,
    },

    /// The server answered with a non-success status.
    #[error("server returned HTTP {status}")]
    HttpStatus { status: u16 },

    /// Transport-level failure (DNS, TLS, timeout, reset).
    #[error("network error: {0}")]
    Network(String),

    /// Corrupt archive, unsafe entry, or unwritable destination.
    #[error("archive extraction failed: {reason}")]
    ExtractionFailed { reason: String },

    /// I/O error while writing the downloaded archive.
    #[error("I/O error: {0}")]
    Io(String),
}

impl FetchError {
    pub(crate) fn extraction(reason: impl Into<String>) -> Self {
        Self::ExtractionFailed {
            reason: reason.into(),
        }
    }

    /// Returns whether another attempt could succeed.
    ///
    /// Server errors and rate limiting are transient; other client errors
    /// are not.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Io(_) => true,
            Self::HttpStatus { status } => *status >= 500 || *status == 429 || *status == 408,
            Self::DownloadFailed { .. } | Self::ExtractionFailed { .. } => false,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<std::io::Error> for FetchError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<zip::result::ZipError> for FetchError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::extraction(err.to_string())
    }
}

/// Result type alias for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(FetchError::Network("reset".into()).is_retryable());
        assert!(FetchError::Io("disk".into()).is_retryable());
        assert!(FetchError::HttpStatus { status: 503 }.is_retryable());
        assert!(FetchError::HttpStatus { status: 429 }.is_retryable());
    }

    #[test]
    fn test_non_retryable_errors() {
        assert!(!FetchError::HttpStatus { status: 404 }.is_retryable());
        assert!(!FetchError::extraction("bad").is_retryable());
        assert!(
            !FetchError::DownloadFailed {
                url: "u".into(),
                attempts: 4,
                reason: "r".into(),
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_download_failed_message() {
        let err = FetchError::DownloadFailed {
            url: "https://example.invalid/a.zip".into(),
            attempts: 4,
            reason: "server returned HTTP 502".into(),
        };
        assert_eq!(
            err.to_string(),
            "download of https://example.invalid/a.zip failed after 4 attempt(s): server returned HTTP 502"
        );
    }
}
