//! Error types for extension scanning.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while scanning the extensions directory.
///
/// Only [`ScanError::ManifestRead`] and [`ScanError::ManifestParse`] are
/// recovered by the scanner; everything else aborts the scan.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Could not determine the current user's home directory")]
    HomeDirUnavailable,

    #[error("Failed to read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk extension folder: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("{source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ScanError {
    /// Returns true if the scan can continue past this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ScanError::ManifestRead { .. } | ScanError::ManifestParse { .. }
        )
    }
}

/// Result type for scan operations.
pub type ScanOutcome<T> = Result<T, ScanError>;
