use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// 將 PDF 轉成每頁一張的圖片
#[async_trait]
pub trait PageRasterizer: Send + Sync {
    /// 圖片寫入 `out_dir`，回傳值依頁碼排序
    async fn rasterize(&self, pdf: &Path, out_dir: &Path) -> Result<Vec<PathBuf>>;
}

/// 從單張圖片讀出文字行（閱讀順序）
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn read_lines(&self, image: &Path) -> Result<Vec<String>>;
}
