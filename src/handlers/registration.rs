use axum::{
    extract::{Query, State},
    response::Json,
};
use validator::Validate;

use crate::dtos::auth_dtos::{
    EmailRequest, MessageResponse, OtpStatusResponse, SessionResponse, StatusQuery,
    VerifyOtpRequest,
};
use crate::errors::{AppError, Result};
use crate::models::user::RegistrationRequest;
use crate::services::otp_controller::{OtpController, VerifyOutcome};
use crate::state::{AppState, SharedOtp};

async fn controller_for(state: &AppState, email: &str) -> Result<SharedOtp> {
    state
        .registrations
        .get(email)
        .await
        .ok_or_else(|| AppError::not_found("No registration OTP for this email"))
}

// 1. Registration form submitted - request OTP
pub async fn request_otp(
    State(state): State<AppState>,
    Json(payload): Json<RegistrationRequest>,
) -> Result<Json<MessageResponse>> {
    payload.validate()?;
    let email = payload.email.trim().to_string();

    let mut controller = OtpController::for_registration(state.api.clone(), payload);
    controller.issue(&email).await?;
    state.registrations.insert(&email, controller).await;

    Ok(Json(MessageResponse::ok(format!("OTP sent to {}", email))))
}

// 2. Resend
pub async fn resend_otp(
    State(state): State<AppState>,
    Json(payload): Json<EmailRequest>,
) -> Result<Json<MessageResponse>> {
    let controller = controller_for(&state, &payload.email).await?;
    controller.lock().await.resend().await?;
    Ok(Json(MessageResponse::ok("OTP resent")))
}

// 3. Verify and finish registration
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(payload): Json<VerifyOtpRequest>,
) -> Result<Json<SessionResponse>> {
    let controller = controller_for(&state, &payload.email).await?;
    let outcome = controller.lock().await.verify(&payload.code).await?;

    match outcome {
        VerifyOutcome::Registered(auth) => {
            state.registrations.remove(&payload.email).await;
            state.session.open(auth.clone()).await;
            Ok(Json(SessionResponse {
                success: true,
                token: auth.token,
                user: auth.user,
            }))
        }
        VerifyOutcome::ResetAuthorized => Err(AppError::OtpStateConflict(
            "Not a registration flow".to_string(),
        )),
    }
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

// User went back to change the email address
pub async fn abandon(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<MessageResponse>> {
    let controller = state
        .registrations
        .remove(&query.email)
        .await
        .ok_or_else(|| AppError::not_found("No registration OTP for this email"))?;
    controller.lock().await.abandon().await;
    Ok(Json(MessageResponse::ok("Registration OTP cancelled")))
}
