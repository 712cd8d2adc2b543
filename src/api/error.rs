use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::utils::error::{ErrorCategory, InvoiceError};

/// HTTP handler 的錯誤型別，統一輸出 `{"error": ..., "code": ...}`
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Invoice(#[from] InvoiceError),

    #[error("Upload error: {0}")]
    Upload(#[from] MultipartError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Invoice(err) => classify_invoice_error(err),
            AppError::Upload(err) => {
                let status = err.status();
                let code = if status == StatusCode::PAYLOAD_TOO_LARGE {
                    "PAYLOAD_TOO_LARGE"
                } else {
                    "BAD_REQUEST"
                };
                (status, code, err.body_text())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// 使用者輸入問題回 4xx，其餘回 500；細節只寫入日誌
fn classify_invoice_error(err: &InvoiceError) -> (StatusCode, &'static str, String) {
    match err {
        InvoiceError::UnsupportedDocument { .. } => (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "UNSUPPORTED_MEDIA_TYPE",
            err.user_friendly_message(),
        ),
        _ if err.category() == ErrorCategory::Input => {
            (StatusCode::BAD_REQUEST, "BAD_REQUEST", err.user_friendly_message())
        }
        _ => {
            tracing::error!(
                error = %err,
                category = ?err.category(),
                severity = ?err.severity(),
                "Invoice processing failed"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
