use tracing_subscriber::EnvFilter;

use vehicle_service_tracker::backend::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(data_dir = %config.data_dir.display(), "Loaded configuration");

    vehicle_service_tracker::run(config).await
}
