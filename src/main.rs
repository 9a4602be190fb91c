use clap::Parser;
use phone_import::core::engine::{ImportEngine, ImportRequest};
use phone_import::utils::{logger, validation::Validate};
use phone_import::{CliConfig, LocalStorage, StandardPipeline};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting phone-import CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let resolved = match config.resolve() {
        Ok(resolved) => resolved,
        Err(e) => {
            tracing::error!("❌ Endpoint configuration failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let request = ImportRequest {
        file: config.file.clone(),
        batch_name: config.batch_name_or_default(),
        column: config.column,
        dry_run: config.dry_run,
    };

    let storage = LocalStorage::new(".".to_string());
    let pipeline = StandardPipeline::new(storage, resolved);
    let engine = ImportEngine::new(pipeline);

    match engine.run(&request).await {
        Ok(report) => {
            if let Some(outcome) = report.outcome {
                tracing::info!("✅ Import completed successfully");
                println!("✅ Batch '{}' submitted", request.batch_name);
                println!(
                    "📊 {} added, {} already known, {} rejected by the server",
                    outcome.added, outcome.duplicates, outcome.invalid
                );
                if !report.batches.is_empty() {
                    println!("📋 Batches on the backend:");
                    for batch in &report.batches {
                        println!(
                            "  {} ({}/{} processed)",
                            batch.batch_name, batch.processed, batch.total
                        );
                    }
                }
            } else {
                println!("✅ Preview finished; re-run without --dry-run to submit");
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Import failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                phone_import::utils::error::ErrorSeverity::Low => 0,
                phone_import::utils::error::ErrorSeverity::Medium => 2,
                phone_import::utils::error::ErrorSeverity::High => 1,
                phone_import::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
