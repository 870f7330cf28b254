use damejidlo_etl::config::CONFIG_FILE_NAME;
use damejidlo_etl::utils::{logger, validation::Validate};
use damejidlo_etl::{AppConfig, EtlEngine, EtlError, GoogleGeocoder, LocalStorage, RestaurantPipeline};
use std::path::{Path, PathBuf};

#[tokio::main]
async fn main() {
    let program_dir = match program_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    // Config is read before logging is up, so failures here go to stderr only.
    let config_path = program_dir.join(CONFIG_FILE_NAME);
    let config = match AppConfig::from_file(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", config_path.display(), e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    logger::init_cli_logger(config.log_level());
    tracing::info!("🚀 Starting damejidlo-etl");
    tracing::debug!("Config loaded from {}", config_path.display());

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    match run(config, &program_dir).await {
        Ok(output_path) => {
            tracing::info!("✅ Scrape completed successfully!");
            tracing::info!("📁 Output saved to: {}", output_path.display());
        }
        Err(e) => {
            tracing::error!("❌ Scrape failed: {} (Category: {:?})", e, e.category());
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    }
}

async fn run(config: AppConfig, program_dir: &Path) -> damejidlo_etl::Result<PathBuf> {
    let geocoder = GoogleGeocoder::from_config(&config)?;
    let storage = LocalStorage::new(program_dir);
    let pipeline = RestaurantPipeline::new(storage, config, geocoder)?;

    let engine = EtlEngine::new(pipeline);
    let output = engine.run().await?;
    Ok(program_dir.join(output))
}

/// Outputs and config live next to the executable, not in the working directory.
fn program_dir() -> damejidlo_etl::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| EtlError::ConfigError {
            message: format!("cannot determine directory of {}", exe.display()),
        })
}
