use thiserror::Error;

#[derive(Error, Debug)]
pub enum InvoiceError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported document: {message}")]
    UnsupportedDocument { message: String },

    #[error("Uploaded document is empty")]
    EmptyDocument,

    #[error("PDF rasterization failed: {message}")]
    RasterizeError { message: String },

    #[error("OCR failed: {message}")]
    OcrError { message: String },

    #[error("External tool '{tool}' could not be started: {source}")]
    ToolNotFound {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("External tool '{tool}' exited with {exit_code:?}: {stderr}")]
    ToolFailed {
        tool: String,
        exit_code: Option<i32>,
        stderr: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Processing,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl InvoiceError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            InvoiceError::ConfigError { .. } | InvoiceError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            InvoiceError::UnsupportedDocument { .. } | InvoiceError::EmptyDocument => {
                ErrorCategory::Input
            }
            InvoiceError::RasterizeError { .. }
            | InvoiceError::OcrError { .. }
            | InvoiceError::SerializationError(_)
            | InvoiceError::CsvError(_) => ErrorCategory::Processing,
            InvoiceError::IoError(_)
            | InvoiceError::ToolNotFound { .. }
            | InvoiceError::ToolFailed { .. } => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            InvoiceError::ToolFailed { .. } | InvoiceError::OcrError { .. } => {
                ErrorSeverity::Medium
            }
            InvoiceError::ToolNotFound { .. } | InvoiceError::IoError(_) => {
                ErrorSeverity::Critical
            }
            _ => ErrorSeverity::High,
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            InvoiceError::ConfigError { .. } | InvoiceError::InvalidConfigValueError { .. } => {
                format!("Configuration problem: {}", self)
            }
            InvoiceError::UnsupportedDocument { .. } => {
                "The file is not a PDF or a supported image (PNG, JPEG, TIFF)".to_string()
            }
            InvoiceError::EmptyDocument => "The uploaded file is empty".to_string(),
            InvoiceError::ToolNotFound { tool, .. } => {
                format!("Required program '{}' is not installed", tool)
            }
            InvoiceError::RasterizeError { .. } => {
                "The document could not be converted to images".to_string()
            }
            InvoiceError::ToolFailed { tool, .. } => {
                format!("External program '{}' failed to process the document", tool)
            }
            InvoiceError::OcrError { .. } => "Text recognition failed".to_string(),
            InvoiceError::IoError(_) => "A file operation failed on the server".to_string(),
            InvoiceError::SerializationError(_) | InvoiceError::CsvError(_) => {
                "The result could not be written".to_string()
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => "Check the configuration file and environment variables",
            ErrorCategory::Input => "Upload a non-empty invoice as PDF, PNG, JPEG or TIFF",
            ErrorCategory::Processing => "Retry with a clearer scan or a higher rasterizer DPI",
            ErrorCategory::System => {
                "Make sure pdftoppm (poppler-utils) and tesseract are installed and on PATH"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, InvoiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_are_categorised() {
        let err = InvoiceError::UnsupportedDocument {
            message: "unknown signature".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("PDF"));
    }

    #[test]
    fn test_missing_tool_is_critical() {
        let err = InvoiceError::ToolNotFound {
            tool: "tesseract".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(err.category(), ErrorCategory::System);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.recovery_suggestion().contains("tesseract"));
    }

    #[test]
    fn test_empty_document_fails_the_cli() {
        // CLI 必須以非零狀態結束
        let err = InvoiceError::EmptyDocument;
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_io_message_hides_os_details() {
        let err = InvoiceError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "No such file or directory at /srv/scratch/job-1",
        ));
        let message = err.user_friendly_message();
        assert!(!message.contains("/srv/scratch"));
        assert!(!message.contains("No such file"));
    }
}
