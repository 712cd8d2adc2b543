// Adapters layer: concrete implementations of the domain ports backed by
// command-line tools installed in the runtime image.

pub mod poppler;
pub mod tesseract;

pub use poppler::PopplerRasterizer;
pub use tesseract::TesseractEngine;

use crate::utils::error::{InvoiceError, Result};
use std::ffi::OsStr;
use std::process::Output;

/// 執行外部程式並等待結束，非零結束碼視為錯誤
pub(crate) async fn run_tool<I, S>(binary: &str, args: I) -> Result<Output>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let output = tokio::process::Command::new(binary)
        .args(args)
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|source| InvoiceError::ToolNotFound {
            tool: binary.to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(InvoiceError::ToolFailed {
            tool: binary.to_string(),
            exit_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(output)
}
