//! # REST API for the Login Gate

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
use crate::backend::domain::commands::auth::LoginCommand;
use crate::backend::AppState;
use shared::{LoginRequest, LoginResponse, SessionResponse, UserListResponse};

/// Routes mounted under `/auth`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/session", get(get_session))
}

/// Users offered in the login dropdown
pub async fn list_users(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/users");

    let users = state
        .auth_service
        .list_users()
        .into_iter()
        .map(AlertMapper::to_user_dto)
        .collect();
    Json(UserListResponse { users })
}

pub async fn login(State(state): State<AppState>, Json(request): Json<LoginRequest>) -> impl IntoResponse {
    info!("POST /api/auth/login - user: {}", request.user_id);

    let command = LoginCommand {
        user_id: request.user_id,
        password: request.password,
    };
    match state.auth_service.login(command).await {
        Ok(user) => {
            let success_message = format!("Welcome, {}", user.name);
            (
                StatusCode::OK,
                Json(LoginResponse {
                    user: AlertMapper::to_user_dto(user),
                    success_message,
                }),
            )
                .into_response()
        }
        Err(e) => error_response("log in", e),
    }
}

pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/auth/logout");

    state.auth_service.logout().await;
    Json(SessionResponse { current_user: None })
}

pub async fn get_session(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/auth/session");

    let current_user = state.auth_service.current_user().await.map(AlertMapper::to_user_dto);
    Json(SessionResponse { current_user })
}
