use crate::model::ScanResult;
use anyhow::Result;

pub fn render_json(result: &ScanResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

pub fn print_json(result: &ScanResult) -> Result<()> {
    println!("{}", render_json(result)?);
    Ok(())
}
