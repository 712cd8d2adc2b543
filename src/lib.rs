pub mod adapters;
pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalOutput, toml_config::ServiceConfig, CliConfig};
pub use core::{fields::ExtractionSettings, processor::InvoiceProcessor};
pub use domain::model::{ExtractionResult, InvoiceData, LineItem};
pub use utils::error::{InvoiceError, Result};
