use axum::extract::{Multipart, State};
use axum::routing::post;
use axum::{Json, Router};

use crate::api::error::{AppError, AppResult};
use crate::api::state::AppState;
use crate::domain::model::ExtractionResult;

/// 上傳欄位名稱
const UPLOAD_FIELD: &str = "file";

/// POST /extract-invoice
///
/// multipart 表單的 `file` 欄位放 PDF 或圖片，回傳 OCR 原始行與擷取欄位。
async fn extract_invoice(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<ExtractionResult>> {
    let mut upload = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload").to_string();
        let data = field.bytes().await?;
        upload = Some((filename, data));
        break;
    }

    let (filename, data) = upload.ok_or_else(|| {
        AppError::BadRequest(format!("multipart field '{}' is required", UPLOAD_FIELD))
    })?;
    tracing::info!(filename = %filename, size = data.len(), "📥 Invoice received");

    let _permit = state
        .jobs
        .acquire()
        .await
        .map_err(|e| AppError::InternalError(format!("job queue closed: {e}")))?;

    let result = state.processor.process_bytes(&data).await?;
    Ok(Json(result))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/extract-invoice", post(extract_invoice))
}
