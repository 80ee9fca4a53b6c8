//! # REST API for Reminder Alerts
//!
//! Exposes the two alert channels to the front end: what is currently
//! shown, and the user's responses to each modal.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use log::info;

use super::error_response;
use super::mappers::alert_mapper::AlertMapper;
use super::mappers::record_mapper::RecordMapper;
use crate::backend::domain::models::vehicle_record::parse_expected_time;
use crate::backend::AppState;
use shared::{AcknowledgeAlertResponse, DismissAlertResponse, RecordResponse, UpdateExpectedTimeRequest};

/// Routes mounted under `/alerts`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_alerts))
        .route("/scan", post(run_scan))
        .route("/weekly/acknowledge", post(acknowledge_weekly_alert))
        .route("/pre-completion/dismiss", post(dismiss_pre_completion_alert))
        .route("/pre-completion/expected-time", post(update_expected_time))
}

/// Alerts currently shown
pub async fn get_alerts(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/alerts");

    Json(AlertMapper::to_alerts_response(state.alert_service.active_alerts().await))
}

/// Run one scanner tick now instead of waiting for the interval
pub async fn run_scan(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/alerts/scan");

    state.alert_service.scan(state.clock.now()).await;
    Json(AlertMapper::to_alerts_response(state.alert_service.active_alerts().await))
}

pub async fn acknowledge_weekly_alert(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/alerts/weekly/acknowledge");

    match state.alert_service.acknowledge_weekly_alert(state.clock.now()).await {
        Ok(record) => (
            StatusCode::OK,
            Json(AcknowledgeAlertResponse {
                record: RecordMapper::to_dto(record),
                success_message: "Reminder acknowledged for 7 days".to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response("acknowledge weekly alert", e),
    }
}

pub async fn dismiss_pre_completion_alert(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/alerts/pre-completion/dismiss");

    let dismissed_record_id = state.alert_service.dismiss_pre_completion_alert(state.clock.now()).await;
    let success_message = match dismissed_record_id {
        Some(_) => "Reminder dismissed",
        None => "No reminder to dismiss",
    };
    Json(DismissAlertResponse {
        dismissed_record_id,
        success_message: success_message.to_string(),
    })
}

/// Set the expected completion time of the record in the pre-completion
/// alert and close it
pub async fn update_expected_time(
    State(state): State<AppState>,
    Json(request): Json<UpdateExpectedTimeRequest>,
) -> impl IntoResponse {
    info!("POST /api/alerts/pre-completion/expected-time - {:?}", request.expected_end_time);

    let expected_end_time = match parse_expected_time(request.expected_end_time.as_deref()) {
        Ok(time) => time,
        Err(e) => return error_response("update expected time", e.into()),
    };

    match state.alert_service.update_expected_time_from_alert(expected_end_time).await {
        Ok(record) => (
            StatusCode::OK,
            Json(RecordResponse {
                record: RecordMapper::to_dto(record),
                success_message: "Expected time updated".to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response("update expected time", e),
    }
}
