//! # REST API Interface Layer
//!
//! HTTP endpoints for the service tracker, mounted under `/api`. Handlers are
//! thin: they map DTOs through [`mappers`], call one domain service and turn
//! domain errors into status codes with [`error_response`].

pub mod alert_apis;
pub mod auth_apis;
pub mod dashboard_apis;
pub mod export_apis;
pub mod form_apis;
pub mod mappers;
pub mod record_apis;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use log::{error, warn};
use serde::Serialize;

use crate::backend::domain::alert_service::AlertError;
use crate::backend::domain::auth_service::AuthError;
use crate::backend::domain::models::vehicle_record::RecordMappingError;
use crate::backend::domain::record_service::RecordError;

/// Body of every non-2xx response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Status code for a service error, chosen by its domain error type
pub fn status_for(e: &anyhow::Error) -> StatusCode {
    if let Some(record_error) = e.downcast_ref::<RecordError>() {
        return match record_error {
            RecordError::NotFound(_) => StatusCode::NOT_FOUND,
            RecordError::ConfirmationRequired(_) => StatusCode::CONFLICT,
        };
    }
    if let Some(auth_error) = e.downcast_ref::<AuthError>() {
        return match auth_error {
            AuthError::MissingFields => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials | AuthError::NotLoggedIn => StatusCode::UNAUTHORIZED,
        };
    }
    if e.downcast_ref::<AlertError>().is_some() {
        return StatusCode::CONFLICT;
    }
    if e.downcast_ref::<RecordMappingError>().is_some() {
        return StatusCode::BAD_REQUEST;
    }
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Log a failed operation and build its JSON error response
pub fn error_response(operation: &str, e: anyhow::Error) -> Response {
    let status = status_for(&e);
    if status.is_server_error() {
        error!("Failed to {}: {:#}", operation, e);
    } else {
        warn!("Rejected {}: {}", operation, e);
    }
    (status, Json(ErrorBody { error: e.to_string() })).into_response()
}
