use axum::{
    extract::{Query, State},
    response::Json,
};

use crate::dtos::auth_dtos::{
    CompleteResetRequest, EmailRequest, MessageResponse, OtpStatusResponse, StatusQuery,
    VerifyOtpRequest,
};
use crate::errors::{AppError, Result};
use crate::models::user::PasswordResetRequest;
use crate::services::otp_controller::OtpController;
use crate::state::{AppState, SharedOtp};

async fn controller_for(state: &AppState, email: &str) -> Result<SharedOtp> {
    state
        .password_resets
        .get(email)
        .await
        .ok_or_else(|| AppError::not_found("No password reset OTP for this email"))
}

// 1. Forgot Password - Request OTP
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(req): Json<EmailRequest>,
) -> Result<Json<MessageResponse>> {
    let email = req.email.trim().to_string();

    let mut controller = OtpController::for_password_reset(state.api.clone());
    controller.issue(&email).await?;
    state.password_resets.insert(&email, controller).await;

    Ok(Json(MessageResponse::ok("OTP sent to your email")))
}

pub async fn resend_otp(
    State(state): State<AppState>,
    Json(req): Json<EmailRequest>,
) -> Result<Json<MessageResponse>> {
    let controller = controller_for(&state, &req.email).await?;
    controller.lock().await.resend().await?;
    Ok(Json(MessageResponse::ok("OTP resent")))
}

// 2. Verify OTP
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(req): Json<VerifyOtpRequest>,
) -> Result<Json<MessageResponse>> {
    let controller = controller_for(&state, &req.email).await?;
    controller.lock().await.verify(&req.code).await?;
    Ok(Json(MessageResponse::ok("OTP verified successfully")))
}

// 3. Reset Password
pub async fn reset_password(
    State(state): State<AppState>,
    Json(req): Json<CompleteResetRequest>,
) -> Result<Json<MessageResponse>> {
    let controller = controller_for(&state, &req.email).await?;
    let reset = PasswordResetRequest {
        password: req.password,
        password_confirmation: req.password_confirmation,
    };
    controller.lock().await.complete_reset(&reset).await?;
    state.password_resets.remove(&req.email).await;

    Ok(Json(MessageResponse::ok("Password reset successful")))
}

pub async fn status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<OtpStatusResponse>> {
    let controller = controller_for(&state, &query.email).await?;
    let challenge = controller.lock().await.status().await;
    Ok(Json(OtpStatusResponse {
        success: true,
        challenge,
    }))
}
