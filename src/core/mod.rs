pub mod address;
pub mod dates;
pub mod document;
pub mod fields;
pub mod items;
pub mod processor;

pub use crate::domain::model::{ExtractionResult, InvoiceData, LineItem};
pub use crate::domain::ports::{OcrEngine, PageRasterizer};
pub use crate::utils::error::Result;
