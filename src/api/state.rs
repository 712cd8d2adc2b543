use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::core::processor::InvoiceProcessor;

/// 所有 handler 共用的狀態
#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<InvoiceProcessor>,
    /// 限制同時進行的 OCR 工作數，超過的請求排隊等待
    pub jobs: Arc<Semaphore>,
}

impl AppState {
    pub fn new(processor: InvoiceProcessor, max_concurrent_jobs: usize) -> Self {
        Self {
            processor: Arc::new(processor),
            jobs: Arc::new(Semaphore::new(max_concurrent_jobs.max(1))),
        }
    }
}
