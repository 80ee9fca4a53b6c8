use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use log::info;
use shared::{FormOptionsResponse, VehicleStatus};

use super::mappers::record_mapper::RecordMapper;
use crate::backend::domain::forms::{intake_defaults, CAR_MODELS};
use crate::backend::AppState;

/// Option lists and a blank form for today's intake
pub async fn get_form_options(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/form/options");

    let today = state.clock.now().date();
    Json(FormOptionsResponse {
        statuses: VehicleStatus::ALL.into_iter().map(RecordMapper::to_status_badge).collect(),
        car_models: CAR_MODELS.iter().map(|m| m.to_string()).collect(),
        defaults: RecordMapper::fields_to_form(intake_defaults(today)),
    })
}
