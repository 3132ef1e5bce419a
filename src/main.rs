use anyhow::Result;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crimewatch::config::Config;
use crimewatch::db::Database;
use crimewatch::web;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (before any other initialization)
    let _ = dotenvy::dotenv();

    let config = Config::load()?;

    // Initialize logging based on LOG_FORMAT env var
    // Use LOG_FORMAT=gcp for structured GCP Cloud Logging
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "gcp" {
        tracing_subscriber::registry()
            .with(tracing_subscriber::filter::LevelFilter::INFO)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(&config.logging.level))
            .init();
    }

    info!("Starting crimewatch API...");
    info!("Configuration loaded");

    let db = Database::new(&config.database).await?;
    db.run_migrations().await?;
    db.seed_if_empty().await?;
    info!("Database initialized");

    web::start_server(&config, db).await?;

    Ok(())
}
