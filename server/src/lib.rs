//! Vehicle service shop tracker: record store, reminder alerts and the REST
//! API the browser front end talks to.

pub mod backend;

use anyhow::{Context, Result};
use log::{error, info};
use tokio::net::TcpListener;

use crate::backend::config::AppConfig;

/// Start the backend, the alert scanner and the HTTP server, and run until
/// Ctrl-C
pub async fn run(config: AppConfig) -> Result<()> {
    let app_state = backend::initialize_backend(&config).await?;
    let router = backend::create_router(app_state.clone(), &config.cors_origin)?;

    let scanner = backend::spawn_alert_scanner(&app_state, config.scan_interval);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("🌐 Starting REST API server at {}", config.bind_addr);

    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    scanner.abort();
    info!("Alert scanner stopped");

    served.context("Axum server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
