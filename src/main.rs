use clap::Parser;
use tuition_etl::core::ConfigProvider;
use tuition_etl::utils::error::{EtlError, ErrorSeverity};
use tuition_etl::utils::{logger, validation::Validate};
use tuition_etl::{CliConfig, EtlEngine, LocalStorage, TomlConfig, TuitionPipeline};

async fn ingest<C>(config: C, monitor_enabled: bool) -> Result<(), EtlError>
where
    C: ConfigProvider + Validate + 'static,
{
    config.validate()?;

    // 創建存儲和管道
    let storage = LocalStorage::new(config.output_path());
    let pipeline = TuitionPipeline::new(storage, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    let run = engine.run().await?;

    tracing::info!("✅ Ingestion completed successfully!");
    println!("✅ Ingestion completed successfully!");
    println!(
        "📚 {} catalogue entries → {} tuition records",
        run.extracted,
        run.dataset.len()
    );
    println!("📁 Output saved to: {}", run.output_path);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // TOML 設定檔優先於命令列參數
    let toml = match cli.config.as_deref().map(TomlConfig::from_file).transpose() {
        Ok(toml) => toml,
        Err(e) => {
            eprintln!("❌ Failed to load config file: {}", e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    let json_logs = cli.json_logs || toml.as_ref().is_some_and(|t| t.json_logs());
    if json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting tuition-etl");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let monitor_enabled = cli.monitor || toml.as_ref().is_some_and(|t| t.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let result = match toml {
        Some(toml) => {
            tracing::info!("📁 Using configuration '{}'", toml.pipeline.name);
            ingest(toml, monitor_enabled).await
        }
        None => ingest(cli, monitor_enabled).await,
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Ingestion failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
