//! Core data types for discovered extensions and scan results.
//!
//! - [`ExtensionRecord`] - A name/version pair read from one manifest
//! - [`ManifestFailure`] - A manifest that could not be read or parsed
//! - [`ScanResult`] - Complete scan results
//!
//! # Example
//!
//! ```
//! use crxlist::{ExtensionRecord, ScanResult};
//!
//! let record = ExtensionRecord::new("TestExt", "1.2.3", "ext/1.2.3/manifest.json");
//! let result = ScanResult::new("ext", vec![record], Vec::new());
//!
//! println!("Found {} extensions", result.extensions.len());
//! ```

mod record;

pub use record::*;
