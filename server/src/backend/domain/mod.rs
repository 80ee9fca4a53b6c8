//! # Domain Module
//!
//! Business logic for the service shop tracker.
//!
//! ## Module Organization
//!
//! - **record_service**: The ordered record store and its mutations
//! - **alert_evaluator**: Pure day/time rules deciding which records need attention
//! - **alert_scanner**: Two-channel reminder state machine ticked on a cadence
//! - **alert_service**: Runs the scanner against the store and applies user responses
//! - **dashboard_service**: Filtered table view with badges and alert markers
//! - **auth_service**: Login gate and the single logged-in session
//! - **forms**: Intake form options, defaults and normalization
//! - **export_service**: CSV export of the record list
//! - **clock**: Local wall-clock source
//!
//! All time arithmetic runs on local wall-clock values (`NaiveDateTime`); the
//! caller supplies "now" so every rule can be tested at a fixed instant.

pub mod alert_evaluator;
pub mod alert_scanner;
pub mod alert_service;
pub mod auth_service;
pub mod clock;
pub mod commands;
pub mod dashboard_service;
pub mod export_service;
pub mod forms;
pub mod models;
pub mod record_service;

pub use alert_service::AlertService;
pub use auth_service::AuthService;
pub use clock::{Clock, SystemClock};
pub use dashboard_service::DashboardService;
pub use export_service::ExportService;
pub use record_service::RecordService;
