//! # REST API for Vehicle Records
//!
//! Endpoints for listing, searching, creating, editing and deleting records.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::info;
use serde::Deserialize;

use super::error_response;
use super::mappers::record_mapper::RecordMapper;
use crate::backend::domain::commands::records::{
    CreateRecordCommand, DeleteRecordCommand, QuickUpdateCommand, RecordFields, UpdateRecordCommand,
};
use crate::backend::domain::models::vehicle_record::parse_service_date;
use crate::backend::domain::record_service::RecordError;
use crate::backend::AppState;
use shared::{DeleteRecordResponse, QuickUpdateRequest, RecordFormRequest, RecordResponse};

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub confirm: bool,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_records).post(create_record))
        .route(
            "/:id",
            get(get_record)
                .put(update_record)
                .patch(quick_update_record)
                .delete(delete_record),
        )
        .route("/:id/form", get(get_record_form))
}

/// List records, optionally filtered by name or plate
pub async fn list_records(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    info!("GET /api/records - search: {:?}", query.search);

    let records = state.record_service.search_records(&query.search).await;
    (StatusCode::OK, Json(RecordMapper::to_record_list_dto(records)))
}

/// Get a record by ID
pub async fn get_record(State(state): State<AppState>, Path(record_id): Path<String>) -> impl IntoResponse {
    info!("GET /api/records/{}", record_id);

    match state.record_service.get_record(&record_id).await {
        Some(record) => (StatusCode::OK, Json(RecordMapper::to_dto(record))).into_response(),
        None => error_response("get record", RecordError::NotFound(record_id).into()),
    }
}

/// Edit form pre-filled from a stored record
pub async fn get_record_form(State(state): State<AppState>, Path(record_id): Path<String>) -> impl IntoResponse {
    info!("GET /api/records/{}/form", record_id);

    match state.record_service.get_record(&record_id).await {
        Some(record) => {
            let fields = RecordFields::from_record(&record);
            (StatusCode::OK, Json(RecordMapper::fields_to_form(fields))).into_response()
        }
        None => error_response("get record form", RecordError::NotFound(record_id).into()),
    }
}

/// Add a new intake for the logged-in advisor
pub async fn create_record(
    State(state): State<AppState>,
    Json(request): Json<RecordFormRequest>,
) -> impl IntoResponse {
    info!("POST /api/records - plate: {}", request.car_number);

    let advisor = match state.auth_service.require_user().await {
        Ok(user) => user,
        Err(e) => return error_response("create record", e),
    };
    let fields = match RecordMapper::form_to_fields(request) {
        Ok(fields) => fields,
        Err(e) => return error_response("create record", e.into()),
    };

    let command = CreateRecordCommand {
        advisor_id: advisor.id,
        fields,
    };
    match state.record_service.create_record(command).await {
        Ok(record) => (
            StatusCode::CREATED,
            Json(RecordResponse {
                record: RecordMapper::to_dto(record),
                success_message: "Record added successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response("create record", e),
    }
}

/// Full edit of an existing record
pub async fn update_record(
    State(state): State<AppState>,
    Path(record_id): Path<String>,
    Json(request): Json<RecordFormRequest>,
) -> impl IntoResponse {
    info!("PUT /api/records/{}", record_id);

    let fields = match RecordMapper::form_to_fields(request) {
        Ok(fields) => fields,
        Err(e) => return error_response("update record", e.into()),
    };

    match state
        .record_service
        .update_record(UpdateRecordCommand { record_id, fields })
        .await
    {
        Ok(record) => (
            StatusCode::OK,
            Json(RecordResponse {
                record: RecordMapper::to_dto(record),
                success_message: "Record updated successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response("update record", e),
    }
}

/// Inline status and/or service date change
pub async fn quick_update_record(
    State(state): State<AppState>,
    Path(record_id): Path<String>,
    Json(request): Json<QuickUpdateRequest>,
) -> impl IntoResponse {
    info!("PATCH /api/records/{} - request: {:?}", record_id, request);

    let service_date = match request.service_date.as_deref().map(parse_service_date).transpose() {
        Ok(date) => date,
        Err(e) => return error_response("quick update record", e.into()),
    };

    let command = QuickUpdateCommand {
        record_id,
        status: request.status,
        service_date,
    };
    match state.record_service.quick_update(command).await {
        Ok(record) => (
            StatusCode::OK,
            Json(RecordResponse {
                record: RecordMapper::to_dto(record),
                success_message: "Record updated successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response("quick update record", e),
    }
}

/// Delete a record; requires `?confirm=true`
pub async fn delete_record(
    State(state): State<AppState>,
    Path(record_id): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> impl IntoResponse {
    info!("DELETE /api/records/{} - confirmed: {}", record_id, query.confirm);

    let command = DeleteRecordCommand {
        record_id,
        confirmed: query.confirm,
    };
    match state.record_service.delete_record(command).await {
        Ok(removed) => (
            StatusCode::OK,
            Json(DeleteRecordResponse {
                deleted_id: removed.id,
                success_message: "Record deleted successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response("delete record", e),
    }
}
