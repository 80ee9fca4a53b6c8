//! # REST API for Data Export
//!
//! Endpoints for exporting the record list as a CSV spreadsheet.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use log::{error, info};

use super::error_response;
use crate::backend::AppState;
use shared::{ExportDataResponse, ExportToPathRequest, ExportToPathResponse};

/// Routes mounted under `/export`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/csv", get(export_records_csv))
        .route("/to-path", post(export_to_path))
}

/// Export every record as CSV content for the browser to download
pub async fn export_records_csv(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/export/csv");

    let records = state.record_service.list_records().await;
    let today = state.clock.now().date();
    match state.export_service.export_records_csv(&records, today) {
        Ok(export) => (
            StatusCode::OK,
            Json(ExportDataResponse {
                csv_data: export.csv_data,
                filename: export.filename,
                record_count: export.record_count,
            }),
        )
            .into_response(),
        Err(e) => error_response("export records", e),
    }
}

/// Write the export into a directory on this machine
pub async fn export_to_path(
    State(state): State<AppState>,
    Json(request): Json<ExportToPathRequest>,
) -> impl IntoResponse {
    info!("POST /api/export/to-path - directory: {:?}", request.directory_path);

    let records = state.record_service.list_records().await;
    let today = state.clock.now().date();
    match state
        .export_service
        .export_to_path(&records, &request.directory_path, today)
    {
        Ok((path, export)) => {
            let file_path = path.to_string_lossy().to_string();
            (
                StatusCode::OK,
                Json(ExportToPathResponse {
                    success: true,
                    message: format!("Exported {} records to {}", export.record_count, file_path),
                    file_path,
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to export to path: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ExportToPathResponse {
                    success: false,
                    message: format!("Failed to export: {}", e),
                    file_path: String::new(),
                }),
            )
                .into_response()
        }
    }
}
