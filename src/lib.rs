//! Admin console for the ticketing platform: OTP registration and password
//! reset flows, event management and the dashboard statistics, all backed by
//! the ticketing REST API.

pub mod config;
pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::{http::Method, response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn build_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .allow_credentials(false);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .nest("/api/auth", routes::auth::routes())
        .nest("/api/register", routes::registration::registration_routes())
        .nest("/api/password", routes::auth_otp_routes::auth_otp_routes())
        .nest("/api/events", routes::events::routes())
        .nest("/api/participants", routes::dashboard::participant_routes())
        .nest("/api/dashboard", routes::dashboard::routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

async fn root_handler() -> &'static str {
    "🎟️ Ticketing Admin Console"
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
