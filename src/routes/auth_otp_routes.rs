use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    handlers::auth_otp,
    state::AppState,
};

pub fn auth_otp_routes() -> Router<AppState> {
    Router::new()
        // Request OTP for password reset
        .route("/forgot", post(auth_otp::forgot_password))
        .route("/forgot/resend", post(auth_otp::resend_otp))

        // Verify OTP
        .route("/verify-otp", post(auth_otp::verify_otp))

        // Reset password with verified OTP
        .route("/reset", post(auth_otp::reset_password))

        .route("/status", get(auth_otp::status))
}
