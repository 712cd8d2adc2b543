use crate::adapters::{PopplerRasterizer, TesseractEngine};
use crate::core::fields::ExtractionSettings;
use crate::core::processor::InvoiceProcessor;
use crate::utils::error::{InvoiceError, Result};
use crate::utils::validation::{
    validate_host, validate_non_empty_string, validate_path, validate_positive_number,
    validate_range, Validate, HOST_REASON,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::sync::Arc;

pub const DEFAULT_PORT: u16 = 10000;
/// 單次上傳上限 1 GiB
pub const MAX_UPLOAD_MB: usize = 1024;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub rasterizer: RasterizerConfig,
    pub ocr: OcrConfig,
    pub extraction: ExtractionSettings,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
    pub request_timeout_seconds: u64,
    /// 同時進行的 OCR 工作數上限
    pub max_concurrent_jobs: usize,
    /// 每個工作的暫存目錄放在這裡，未設定時使用系統暫存目錄
    pub scratch_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            max_upload_mb: 25,
            request_timeout_seconds: 300,
            max_concurrent_jobs: 2,
            scratch_dir: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterizerConfig {
    pub binary: String,
    pub dpi: u32,
}

impl Default for RasterizerConfig {
    fn default() -> Self {
        Self {
            binary: "pdftoppm".to_string(),
            dpi: 300,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    pub binary: String,
    pub language: String,
    pub page_segmentation_mode: Option<u8>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            binary: "tesseract".to_string(),
            language: "eng".to_string(),
            page_segmentation_mode: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl ServiceConfig {
    /// 載入順序：預設值 → TOML 檔（若有）→ 環境變數
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(InvoiceError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| InvoiceError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${TESSERACT_BIN})，未定義的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    /// `HOST`、`PORT`、`LOG_FORMAT` 覆蓋檔案設定
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var("HOST") {
            self.server.host = host;
        }

        if let Ok(port) = std::env::var("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| InvoiceError::InvalidConfigValueError {
                    field: "PORT".to_string(),
                    value: port.clone(),
                    reason: "PORT must be a number between 0 and 65535".to_string(),
                })?;
        }

        if let Ok(format) = std::env::var("LOG_FORMAT") {
            self.logging.format = match format.to_lowercase().as_str() {
                "json" => LogFormat::Json,
                "compact" => LogFormat::Compact,
                _ => {
                    return Err(InvoiceError::InvalidConfigValueError {
                        field: "LOG_FORMAT".to_string(),
                        value: format,
                        reason: "Valid formats: compact, json".to_string(),
                    })
                }
            };
        }

        Ok(())
    }

    pub fn bind_address(&self) -> Result<SocketAddr> {
        let ip: IpAddr =
            self.server
                .host
                .parse()
                .map_err(|_| InvoiceError::InvalidConfigValueError {
                    field: "server.host".to_string(),
                    value: self.server.host.clone(),
                    reason: HOST_REASON.to_string(),
                })?;
        Ok(SocketAddr::new(ip, self.server.port))
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.server.max_upload_mb.saturating_mul(1024 * 1024)
    }

    /// 依設定建立 pdftoppm + tesseract 的處理流程
    pub fn build_processor(&self) -> InvoiceProcessor {
        let rasterizer = PopplerRasterizer::new(&self.rasterizer.binary, self.rasterizer.dpi);
        let ocr = TesseractEngine::new(&self.ocr.binary, &self.ocr.language)
            .with_page_segmentation_mode(self.ocr.page_segmentation_mode);

        let processor =
            InvoiceProcessor::new(Arc::new(rasterizer), Arc::new(ocr), self.extraction.clone());
        match &self.server.scratch_dir {
            Some(dir) => processor.with_scratch_dir(dir),
            None => processor,
        }
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_host("server.host", &self.server.host)?;
        validate_range(
            "server.max_upload_mb",
            self.server.max_upload_mb,
            1,
            MAX_UPLOAD_MB,
        )?;
        validate_positive_number(
            "server.max_concurrent_jobs",
            self.server.max_concurrent_jobs,
            1,
        )?;
        validate_range(
            "server.request_timeout_seconds",
            self.server.request_timeout_seconds,
            1,
            3600,
        )?;
        if let Some(dir) = &self.server.scratch_dir {
            validate_path("server.scratch_dir", dir)?;
        }

        validate_path("rasterizer.binary", &self.rasterizer.binary)?;
        validate_range("rasterizer.dpi", self.rasterizer.dpi, 72, 1200)?;

        validate_path("ocr.binary", &self.ocr.binary)?;
        validate_non_empty_string("ocr.language", &self.ocr.language)?;
        if let Some(psm) = self.ocr.page_segmentation_mode {
            validate_range("ocr.page_segmentation_mode", psm, 0, 13)?;
        }

        validate_positive_number("extraction.date_window", self.extraction.date_window, 2)?;

        Ok(())
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
