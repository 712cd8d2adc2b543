use crate::core::document::DocumentKind;
use crate::core::fields::{extract_invoice_fields, ExtractionSettings};
use crate::domain::model::ExtractionResult;
use crate::domain::ports::{OcrEngine, PageRasterizer};
use crate::utils::error::{InvoiceError, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tempfile::TempDir;

/// 單一發票的處理流程：轉圖 → OCR → 欄位擷取
///
/// 每次處理都有自己的暫存目錄，結束時（包含失敗）自動刪除。
pub struct InvoiceProcessor {
    rasterizer: Arc<dyn PageRasterizer>,
    ocr: Arc<dyn OcrEngine>,
    settings: ExtractionSettings,
    scratch_dir: Option<PathBuf>,
}

impl InvoiceProcessor {
    pub fn new(
        rasterizer: Arc<dyn PageRasterizer>,
        ocr: Arc<dyn OcrEngine>,
        settings: ExtractionSettings,
    ) -> Self {
        Self {
            rasterizer,
            ocr,
            settings,
            scratch_dir: None,
        }
    }

    /// 暫存目錄的上層位置，預設為系統暫存目錄
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    pub fn settings(&self) -> &ExtractionSettings {
        &self.settings
    }

    pub async fn process_file(&self, path: &Path) -> Result<ExtractionResult> {
        tracing::info!("📄 Reading invoice from {}", path.display());
        let bytes = tokio::fs::read(path).await?;
        self.process_bytes(&bytes).await
    }

    pub async fn process_bytes(&self, bytes: &[u8]) -> Result<ExtractionResult> {
        let started = Instant::now();
        let kind = DocumentKind::detect(bytes)?;
        tracing::debug!(kind = ?kind, size = bytes.len(), "Processing document");

        let workdir = self.create_workdir()?;
        let input = workdir.path().join(format!("upload.{}", kind.extension()));
        tokio::fs::write(&input, bytes).await?;

        // Rasterize
        let pages = if kind.needs_rasterizing() {
            let pages = self.rasterizer.rasterize(&input, workdir.path()).await?;
            if pages.is_empty() {
                return Err(InvoiceError::RasterizeError {
                    message: "PDF produced no pages".to_string(),
                });
            }
            pages
        } else {
            vec![input]
        };
        tracing::debug!("Rasterized {} page(s)", pages.len());

        // OCR
        let mut raw_text = Vec::new();
        for (idx, page) in pages.iter().enumerate() {
            let lines = self.ocr.read_lines(page).await?;
            tracing::debug!(page = idx + 1, lines = lines.len(), "OCR page complete");
            raw_text.extend(lines);
        }

        // Extract
        let extracted = extract_invoice_fields(&raw_text, &self.settings);

        tracing::info!(
            pages = pages.len(),
            lines = raw_text.len(),
            items = extracted.items.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "✅ Invoice processed"
        );

        Ok(ExtractionResult {
            raw_text,
            extracted,
        })
    }

    fn create_workdir(&self) -> Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("invoice-ocr-");
        let dir = match &self.scratch_dir {
            Some(parent) => builder.tempdir_in(parent)?,
            None => builder.tempdir()?,
        };
        Ok(dir)
    }
}
