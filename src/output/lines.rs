use crate::model::ScanResult;
use anyhow::Result;

/// Renders the plain listing: failures first, then one line per extension.
pub fn render_lines(result: &ScanResult) -> Vec<String> {
    let failures = result
        .failures
        .iter()
        .map(|f| format!("Error processing {}: {}", f.path.display(), f.error));

    let extensions = result
        .extensions
        .iter()
        .map(|e| format!("Extension: {}, Version: {}", e.name, e.version));

    failures.chain(extensions).collect()
}

pub fn print_lines(result: &ScanResult) -> Result<()> {
    for line in render_lines(result) {
        println!("{}", line);
    }
    Ok(())
}
