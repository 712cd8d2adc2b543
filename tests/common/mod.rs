#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use invoice_ocr::api::{build_router, state::AppState};
use invoice_ocr::core::{OcrEngine, PageRasterizer};
use invoice_ocr::{ExtractionSettings, InvoiceError, InvoiceProcessor, Result};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

pub const BOUNDARY: &str = "invoice-ocr-test-boundary";

/// OCR 讀到的典型澳洲票務發票
pub fn tixperts_invoice_lines() -> Vec<String> {
    [
        "TAX INVOICE",
        "TixPerts Pty Ltd TIA Ticket Experts",
        "ABN 51 824 753 556",
        "Level 3",
        "230 Elizabeth Street",
        "Melbourne VIC 3000",
        "Australia",
        "Invoice Number",
        "TX.482-07.INV-0193",
        "Invoice Date",
        "14 Feb 2025",
        "Due Date: 28 Feb 2025",
        "Description",
        "Quantity",
        "Unit Price",
        "GST",
        "Amount AUD",
        "TIXPERTS-88213",
        "General Admission",
        "2",
        "38.50",
        "10%",
        "77.00",
        "Booking Fee",
        "1",
        "4.00",
        "10%",
        "4.00",
        "Customer",
        "Jordan Lee",
        "Payment Due",
        "INCLUDES GST",
        "7.36",
        "TOTAL AUD 81.00",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// 每份 PDF 都產生一頁
pub struct SinglePageRasterizer;

#[async_trait]
impl PageRasterizer for SinglePageRasterizer {
    async fn rasterize(&self, _pdf: &Path, out_dir: &Path) -> Result<Vec<PathBuf>> {
        let page = out_dir.join("page-1.png");
        tokio::fs::write(&page, b"\x89PNG\r\n\x1a\n").await?;
        Ok(vec![page])
    }
}

/// 不論輸入都回傳固定的文字行
pub struct FixedOcr(pub Vec<String>);

#[async_trait]
impl OcrEngine for FixedOcr {
    async fn read_lines(&self, _image: &Path) -> Result<Vec<String>> {
        Ok(self.0.clone())
    }
}

/// 每次辨識都先睡一段時間
pub struct SlowOcr(pub Duration);

#[async_trait]
impl OcrEngine for SlowOcr {
    async fn read_lines(&self, _image: &Path) -> Result<Vec<String>> {
        tokio::time::sleep(self.0).await;
        Ok(Vec::new())
    }
}

/// 等 `gate` 放行才回傳，並記錄被呼叫的次數
pub struct GatedOcr {
    pub gate: Arc<Semaphore>,
    pub calls: Arc<AtomicUsize>,
}

impl GatedOcr {
    pub fn new() -> Self {
        Self {
            gate: Arc::new(Semaphore::new(0)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl OcrEngine for GatedOcr {
    async fn read_lines(&self, _image: &Path) -> Result<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _permit = self
            .gate
            .acquire()
            .await
            .map_err(|e| InvoiceError::OcrError {
                message: e.to_string(),
            })?;
        Ok(vec!["Customer".to_string(), "Jordan Lee".to_string()])
    }
}

pub fn processor_with_ocr(ocr: Arc<dyn OcrEngine>) -> InvoiceProcessor {
    InvoiceProcessor::new(
        Arc::new(SinglePageRasterizer),
        ocr,
        ExtractionSettings::default(),
    )
}

pub fn stub_processor(lines: Vec<String>) -> InvoiceProcessor {
    InvoiceProcessor::new(
        Arc::new(SinglePageRasterizer),
        Arc::new(FixedOcr(lines)),
        ExtractionSettings::default(),
    )
}

pub fn build_test_app(lines: Vec<String>) -> Router {
    build_app_with(
        stub_processor(lines),
        1024 * 1024,
        Duration::from_secs(30),
        2,
    )
}

pub fn build_app_with(
    processor: InvoiceProcessor,
    max_upload_bytes: usize,
    request_timeout: Duration,
    max_concurrent_jobs: usize,
) -> Router {
    let state = AppState::new(processor, max_concurrent_jobs);
    build_router(state, max_upload_bytes, request_timeout)
}

pub fn multipart_request(field: &str, filename: &str, content: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/extract-invoice")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
