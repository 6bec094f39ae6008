pub mod config;
pub mod error;
pub mod manifest;
pub mod model;
pub mod output;
pub mod platform;
pub mod scanner;

pub use config::Config;
pub use error::{ScanError, ScanOutcome};
pub use model::{ExtensionRecord, ManifestFailure, ScanResult};
pub use scanner::Scanner;
