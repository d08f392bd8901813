use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::registration;
use crate::state::AppState;

pub fn registration_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/otp",
            post(registration::request_otp).delete(registration::abandon),
        )
        .route("/otp/resend", post(registration::resend_otp))
        .route("/otp/verify", post(registration::verify_otp))
        .route("/otp/status", get(registration::status))
}
