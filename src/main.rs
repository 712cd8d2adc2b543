use clap::Parser;
use invoice_ocr::config::Command;
use invoice_ocr::utils::error::{ErrorSeverity, InvoiceError};
use invoice_ocr::utils::{logger, validation::Validate};
use invoice_ocr::{api, CliConfig, LocalOutput, ServiceConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = CliConfig::parse();

    if let Err(e) = run(cli).await {
        // 記錄詳細錯誤信息
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

async fn run(cli: CliConfig) -> Result<(), InvoiceError> {
    let mut config = ServiceConfig::load(cli.config.as_deref())?;

    match cli.command() {
        Command::Serve { host, port } => {
            logger::init_server_logger(config.logging.format, cli.verbose);

            // 應用命令列覆蓋設定
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;
            tracing::debug!("Service config: {:?}", config);

            api::serve(&config).await
        }
        Command::Extract {
            file,
            output,
            items_csv,
        } => {
            logger::init_cli_logger(cli.verbose);
            config.validate()?;

            let processor = config.build_processor();
            let result = processor.process_file(&file).await?;

            let writer = LocalOutput::new();
            writer.write_json(&result, output.as_deref())?;
            if let Some(path) = items_csv {
                writer.write_items_csv(&result.extracted.items, &path)?;
            }
            Ok(())
        }
    }
}
