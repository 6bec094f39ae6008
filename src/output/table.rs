use crate::model::ScanResult;
use anyhow::Result;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct ExtensionRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "ID")]
    id: String,
}

#[derive(Tabled)]
struct FailureRow {
    #[tabled(rename = "Manifest")]
    path: String,
    #[tabled(rename = "Error")]
    error: String,
}

pub fn render_table(result: &ScanResult) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Scanned {} at {}\n\n",
        result.extensions_dir.display(),
        result.scan_time.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    if result.extensions.is_empty() {
        out.push_str("No extensions found.\n");
    } else {
        out.push_str(&format!("Found {} extensions:\n\n", result.extensions.len()));

        let rows: Vec<ExtensionRow> = result
            .extensions
            .iter()
            .map(|e| ExtensionRow {
                name: truncate(&e.name, 40),
                version: e.version.clone(),
                id: e.extension_id().unwrap_or("-").to_string(),
            })
            .collect();

        out.push_str(&Table::new(rows).with(Style::rounded()).to_string());
        out.push('\n');
    }

    if !result.failures.is_empty() {
        out.push_str(&format!(
            "\n{} manifests could not be read:\n\n",
            result.failures.len()
        ));

        let rows: Vec<FailureRow> = result
            .failures
            .iter()
            .map(|f| FailureRow {
                path: f.path.display().to_string(),
                error: truncate(&f.error, 60),
            })
            .collect();

        out.push_str(&Table::new(rows).with(Style::rounded()).to_string());
        out.push('\n');
    }

    out
}

pub fn print_table(result: &ScanResult) -> Result<()> {
    println!();
    print!("{}", render_table(result));
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
