pub mod cli;
pub mod toml_config;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "invoice-ocr")]
#[command(about = "Invoice OCR service: extracts structured fields from scanned invoices")]
#[command(version)]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true, env = "INVOICE_OCR_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the HTTP API (default)
    Serve {
        /// Override server.host
        #[arg(long)]
        host: Option<String>,

        /// Override server.port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Extract one invoice file and print the JSON result
    Extract {
        /// PDF, PNG, JPEG or TIFF file
        file: PathBuf,

        /// Write the JSON result to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write the line items as CSV
        #[arg(long)]
        items_csv: Option<PathBuf>,
    },
}

impl CliConfig {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve {
            host: None,
            port: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_serve() {
        let cli = CliConfig::parse_from(["invoice-ocr"]);
        assert!(matches!(
            cli.command(),
            Command::Serve {
                host: None,
                port: None
            }
        ));
    }

    #[test]
    fn test_parse_extract_with_outputs() {
        let cli = CliConfig::parse_from([
            "invoice-ocr",
            "extract",
            "invoice.pdf",
            "--output",
            "out.json",
            "--items-csv",
            "items.csv",
            "--verbose",
        ]);

        assert!(cli.verbose);
        match cli.command() {
            Command::Extract {
                file,
                output,
                items_csv,
            } => {
                assert_eq!(file, PathBuf::from("invoice.pdf"));
                assert_eq!(output, Some(PathBuf::from("out.json")));
                assert_eq!(items_csv, Some(PathBuf::from("items.csv")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
