use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::scanner::EXTENSION_ID_LEN;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionRecord {
    pub name: String,
    pub version: String,
    pub manifest_path: PathBuf,
}

impl ExtensionRecord {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        manifest_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            manifest_path: manifest_path.into(),
        }
    }

    /// The extension ID, taken from the folder two levels above the manifest.
    ///
    /// Returns `None` if the manifest does not sit in an extension folder.
    pub fn extension_id(&self) -> Option<&str> {
        let id = self
            .manifest_path
            .parent()
            .and_then(Path::parent)
            .and_then(Path::file_name)
            .and_then(|n| n.to_str())?;
        (id.chars().count() == EXTENSION_ID_LEN).then_some(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestFailure {
    pub path: PathBuf,
    pub error: String,
}

impl ManifestFailure {
    pub fn new(path: impl Into<PathBuf>, error: impl ToString) -> Self {
        Self {
            path: path.into(),
            error: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub scan_time: DateTime<Utc>,
    pub extensions_dir: PathBuf,
    pub extensions: Vec<ExtensionRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<ManifestFailure>,
}

impl ScanResult {
    pub fn new(
        extensions_dir: impl Into<PathBuf>,
        extensions: Vec<ExtensionRecord>,
        failures: Vec<ManifestFailure>,
    ) -> Self {
        Self {
            scan_time: Utc::now(),
            extensions_dir: extensions_dir.into(),
            extensions,
            failures,
        }
    }
}
