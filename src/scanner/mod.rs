//! Extension scanners.
//!
//! This module provides the [`Scanner`] trait and the [`ChromeScanner`]
//! implementation, which reads the default Chrome profile's extensions
//! directory.
//!
//! # Layout
//!
//! ```text
//! Extensions/
//!   <32-character extension ID>/
//!     <version>/
//!       manifest.json
//! ```
//!
//! # Example
//!
//! ```no_run
//! use crxlist::scanner::{ChromeScanner, ScanOptions, Scanner};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let scanner = ChromeScanner::new(ScanOptions::default())?;
//!     let result = scanner.scan().await?;
//!     for ext in &result.extensions {
//!         println!("{}: {}", ext.name, ext.version);
//!     }
//!     Ok(())
//! }
//! ```

pub(crate) mod chrome;

pub use chrome::{
    candidate_folders, is_extension_id, manifest_paths, scan_extensions, ChromeScanner,
    ScanOptions, EXTENSION_ID_LEN,
};

use crate::error::ScanOutcome;
use crate::model::ScanResult;
use async_trait::async_trait;
use std::path::Path;

/// Trait for scanning an extensions directory.
#[async_trait]
pub trait Scanner: Send + Sync {
    /// Returns the human-readable name of this scanner.
    fn name(&self) -> &'static str;

    /// Returns the directory this scanner reads.
    fn extensions_dir(&self) -> &Path;

    /// Scans for installed extensions.
    ///
    /// # Errors
    ///
    /// Returns an error if the extensions directory cannot be listed.
    /// Individual manifests that fail to load are reported in
    /// [`ScanResult::failures`] instead.
    async fn scan(&self) -> ScanOutcome<ScanResult>;
}
