use crate::utils::error::{InvoiceError, Result};

/// 上傳檔案的實際格式，依檔頭判斷，不信任檔名或 Content-Type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Png,
    Jpeg,
    Tiff,
}

impl DocumentKind {
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(b"%PDF-") {
            Some(Self::Pdf)
        } else if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
            Some(Self::Png)
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(Self::Jpeg)
        } else if bytes.starts_with(b"II*\0") || bytes.starts_with(b"MM\0*") {
            Some(Self::Tiff)
        } else {
            None
        }
    }

    pub fn detect(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(InvoiceError::EmptyDocument);
        }
        Self::sniff(bytes).ok_or_else(|| InvoiceError::UnsupportedDocument {
            message: format!(
                "unrecognised file signature {:02x?}",
                &bytes[..bytes.len().min(8)]
            ),
        })
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Tiff => "tiff",
        }
    }

    pub fn needs_rasterizing(self) -> bool {
        matches!(self, Self::Pdf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_known_signatures() {
        assert_eq!(DocumentKind::sniff(b"%PDF-1.7\n..."), Some(DocumentKind::Pdf));
        assert_eq!(
            DocumentKind::sniff(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR"),
            Some(DocumentKind::Png)
        );
        assert_eq!(DocumentKind::sniff(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(DocumentKind::Jpeg));
        assert_eq!(DocumentKind::sniff(b"II*\0\x08\0\0\0"), Some(DocumentKind::Tiff));
        assert_eq!(DocumentKind::sniff(b"hello world"), None);
    }

    #[test]
    fn test_detect_errors() {
        assert!(matches!(
            DocumentKind::detect(b""),
            Err(InvoiceError::EmptyDocument)
        ));
        assert!(matches!(
            DocumentKind::detect(b"PK\x03\x04"),
            Err(InvoiceError::UnsupportedDocument { .. })
        ));
    }
}
