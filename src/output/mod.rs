mod json;
mod lines;
mod table;

pub use json::print_json;
pub use lines::{print_lines, render_lines};
pub use table::print_table;

use crate::model::ScanResult;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Output format for scan results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One `Extension: ..., Version: ...` line per record
    #[default]
    Lines,
    /// JSON format for programmatic use
    Json,
    /// Human-readable table format
    Table,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lines" | "text" => Ok(OutputFormat::Lines),
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            _ => Err(format!(
                "Unknown format: {}. Use 'lines', 'json', or 'table'",
                s
            )),
        }
    }
}

pub fn print_result(result: &ScanResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Lines => print_lines(result),
        OutputFormat::Json => print_json(result),
        OutputFormat::Table => print_table(result),
    }
}
