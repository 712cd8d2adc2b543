use crate::adapters::run_tool;
use crate::domain::ports::PageRasterizer;
use crate::utils::error::{InvoiceError, Result};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

const PAGE_PREFIX: &str = "page";

/// 使用 poppler 的 `pdftoppm` 把每頁轉成 PNG
#[derive(Debug, Clone)]
pub struct PopplerRasterizer {
    binary: String,
    dpi: u32,
}

impl PopplerRasterizer {
    pub fn new(binary: impl Into<String>, dpi: u32) -> Self {
        Self {
            binary: binary.into(),
            dpi,
        }
    }

    fn args(&self, pdf: &Path, out_dir: &Path) -> Vec<OsString> {
        vec![
            "-r".into(),
            self.dpi.to_string().into(),
            "-png".into(),
            pdf.as_os_str().to_owned(),
            out_dir.join(PAGE_PREFIX).into_os_string(),
        ]
    }
}

#[async_trait]
impl PageRasterizer for PopplerRasterizer {
    async fn rasterize(&self, pdf: &Path, out_dir: &Path) -> Result<Vec<PathBuf>> {
        tracing::debug!("Rasterizing {} at {} DPI", pdf.display(), self.dpi);
        run_tool(&self.binary, self.args(pdf, out_dir)).await?;

        let mut entries = tokio::fs::read_dir(out_dir).await?;
        let mut pages = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if is_page_image(&path) {
                pages.push(path);
            }
        }

        if pages.is_empty() {
            return Err(InvoiceError::RasterizeError {
                message: format!("{} produced no page images", self.binary),
            });
        }

        // pdftoppm 的頁碼補零寬度在同一次輸出中一致，字串排序即頁碼順序
        pages.sort();
        Ok(pages)
    }
}

fn is_page_image(path: &Path) -> bool {
    let name = match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name,
        None => return false,
    };
    name.starts_with(&format!("{}-", PAGE_PREFIX)) && name.ends_with(".png")
}
