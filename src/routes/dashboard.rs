use axum::{
    routing::get,
    Router,
};

use crate::handlers::dashboard;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::get_dashboard))
        .route("/export.csv", get(dashboard::export_csv))
}

pub fn participant_routes() -> Router<AppState> {
    Router::new().route("/", get(dashboard::list_participants))
}
