use crate::adapters::run_tool;
use crate::domain::ports::OcrEngine;
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::Path;

use crate::utils::error::Result;

/// 呼叫 `tesseract` CLI，輸出導到 stdout 後逐行切開
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    binary: String,
    language: String,
    page_segmentation_mode: Option<u8>,
}

impl TesseractEngine {
    pub fn new(binary: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            language: language.into(),
            page_segmentation_mode: None,
        }
    }

    pub fn with_page_segmentation_mode(mut self, psm: Option<u8>) -> Self {
        self.page_segmentation_mode = psm;
        self
    }

    fn args(&self, image: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            image.as_os_str().to_owned(),
            "stdout".into(),
            "-l".into(),
            self.language.clone().into(),
        ];
        if let Some(psm) = self.page_segmentation_mode {
            args.push("--psm".into());
            args.push(psm.to_string().into());
        }
        args
    }
}

#[async_trait]
impl OcrEngine for TesseractEngine {
    async fn read_lines(&self, image: &Path) -> Result<Vec<String>> {
        tracing::debug!("Running OCR on {}", image.display());
        let output = run_tool(&self.binary, self.args(image)).await?;
        Ok(split_lines(&String::from_utf8_lossy(&output.stdout)))
    }
}

fn split_lines(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
