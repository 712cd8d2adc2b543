use crate::domain::model::{ExtractionResult, LineItem};
use crate::utils::error::{InvoiceError, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

/// `extract` 子命令的輸出：JSON 寫到檔案或 stdout，明細可另存 CSV
#[derive(Debug, Clone, Default)]
pub struct LocalOutput;

impl LocalOutput {
    pub fn new() -> Self {
        Self
    }

    pub fn write_json(&self, result: &ExtractionResult, path: Option<&Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(result)?;

        match path {
            Some(path) => {
                ensure_parent(path)?;
                fs::write(path, json)?;
                tracing::info!("📁 JSON saved to: {}", path.display());
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{}", json)?;
            }
        }
        Ok(())
    }

    pub fn write_items_csv(&self, items: &[LineItem], path: &Path) -> Result<()> {
        ensure_parent(path)?;
        fs::write(path, items_to_csv(items)?)?;
        tracing::info!("📁 {} line item(s) saved to: {}", items.len(), path.display());
        Ok(())
    }
}

pub fn items_to_csv(items: &[LineItem]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if items.is_empty() {
        writer.write_record([
            "description",
            "quantity",
            "unit_price",
            "gst_percent",
            "line_total",
        ])?;
    }
    for item in items {
        writer.serialize(item)?;
    }
    writer
        .into_inner()
        .map_err(|e| InvoiceError::IoError(e.into_error()))
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
