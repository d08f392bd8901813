use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Json},
};
use chrono::Utc;

use crate::errors::Result;
use crate::models::dashboard::DashboardSnapshot;
use crate::models::participant::Participant;
use crate::services::{csv_export, dashboard};
use crate::state::AppState;

pub async fn list_participants(State(state): State<AppState>) -> Result<Json<Vec<Participant>>> {
    Ok(Json(state.api.list_participants().await?))
}

pub async fn get_dashboard(State(state): State<AppState>) -> Result<Json<DashboardSnapshot>> {
    let start_time = std::time::Instant::now();

    let participants = state.api.list_participants().await?;
    let events = state.events.list().await;
    let snapshot = dashboard::aggregate(&events, &participants, Utc::now());

    tracing::info!(
        "Dashboard for {} events / {} participants in {:?}",
        snapshot.total_events,
        snapshot.total_participants,
        start_time.elapsed()
    );
    Ok(Json(snapshot))
}

pub async fn export_csv(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let participants = state.api.list_participants().await?;
    let events = state.events.list().await;
    let body = csv_export::export_events_csv(&events, &participants);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"events.csv\"",
            ),
        ],
        body,
    ))
}
