use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json},
};
use log::info;

use super::mappers::alert_mapper::AlertMapper;
use super::record_apis::SearchQuery;
use crate::backend::AppState;

/// Dashboard table for the current search term
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    info!("GET /api/dashboard - search: {:?}", query.search);

    let now = state.clock.now();
    let dashboard = state.dashboard_service.build_dashboard(&query.search, now).await;
    let current_user = state.auth_service.current_user().await;

    Json(AlertMapper::to_dashboard_response(dashboard, current_user))
}
