//! # Backend Module
//!
//! Contains all non-UI logic for the service tracker.
//!
//! This module serves as the orchestration layer that brings together:
//! - **Domain**: Record store, alert rules, reminder scanner, login gate
//! - **Storage**: The file-backed JSON key-value store
//! - **IO**: REST API exposing the domain to the browser front end
//!
//! ## Architecture
//!
//! ```text
//! Browser front end
//!     ↓
//! IO Layer (REST API, DTO mappers)
//!     ↓
//! Domain Layer (services, alert rules)
//!     ↓
//! Storage Layer (JSON files)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tower_http::cors::{Any, CorsLayer};

use crate::backend::config::AppConfig;
use crate::backend::domain::auth_service::StaticAuthenticator;
use crate::backend::domain::{
    AlertService, AuthService, Clock, DashboardService, ExportService, RecordService, SystemClock,
};
use crate::backend::io::rest::{
    alert_apis, auth_apis, dashboard_apis, export_apis, form_apis, record_apis,
};
use crate::backend::storage::{JsonConnection, RecordRepository, RecordStorage};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub record_service: RecordService,
    pub alert_service: AlertService,
    pub auth_service: AuthService,
    pub dashboard_service: DashboardService,
    pub export_service: ExportService,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Wire every service around one record store
    pub async fn build(storage: Arc<dyn RecordStorage>, clock: Arc<dyn Clock>) -> Result<Self> {
        let record_service = RecordService::load(storage).await?;

        Ok(Self {
            alert_service: AlertService::new(record_service.clone()),
            dashboard_service: DashboardService::new(record_service.clone()),
            auth_service: AuthService::new(Arc::new(StaticAuthenticator::default())),
            export_service: ExportService::new(),
            record_service,
            clock,
        })
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up data directory at {}", config.data_dir.display());
    let connection = JsonConnection::new(&config.data_dir)?;

    info!("Setting up domain model");
    let repository = RecordRepository::new(connection);
    AppState::build(Arc::new(repository), Arc::new(SystemClock)).await
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: &str) -> Result<Router> {
    let origin = cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin '{}'", cors_origin))?;

    // CORS setup to allow frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/users", get(auth_apis::list_users))
        .nest("/auth", auth_apis::router())
        .nest("/records", record_apis::router())
        .route("/dashboard", get(dashboard_apis::get_dashboard))
        .nest("/alerts", alert_apis::router())
        .nest("/export", export_apis::router())
        .route("/form/options", get(form_apis::get_form_options));

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state))
}

/// Tick the alert scanner every `interval` until the handle is aborted.
/// The first scan runs immediately, on the same clock the handlers use.
pub fn spawn_alert_scanner(app_state: &AppState, interval: Duration) -> JoinHandle<()> {
    info!("Starting alert scanner every {:?}", interval);
    let alert_service = app_state.alert_service.clone();
    let clock = app_state.clock.clone();

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            let events = alert_service.scan(clock.now()).await;
            if !events.is_empty() {
                debug!("Alert scan events: {:?}", events);
            }
        }
    })
}
