use axum::{extract::State, response::Json};
use validator::Validate;

use crate::dtos::auth_dtos::{CurrentUserResponse, MessageResponse, SessionResponse};
use crate::errors::{AppError, Result};
use crate::models::user::LoginRequest;
use crate::state::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<SessionResponse>> {
    payload.validate()?;

    let auth = state.api.login(&payload).await?;
    state.session.open(auth.clone()).await;

    Ok(Json(SessionResponse {
        success: true,
        token: auth.token,
        user: auth.user,
    }))
}

pub async fn logout(State(state): State<AppState>) -> Json<MessageResponse> {
    let message = if state.session.close().await {
        "Logged out"
    } else {
        "No active session"
    };
    Json(MessageResponse::ok(message))
}

pub async fn current_session(State(state): State<AppState>) -> Result<Json<CurrentUserResponse>> {
    let user = state.session.user().await.ok_or(AppError::Unauthorized)?;
    Ok(Json(CurrentUserResponse {
        success: true,
        user,
    }))
}
