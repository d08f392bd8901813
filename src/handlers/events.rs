use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use crate::errors::Result;
use crate::models::event::{Event, EventInput};
use crate::state::AppState;

pub async fn list_events(State(state): State<AppState>) -> Json<Vec<Event>> {
    Json(state.events.list().await)
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Event>> {
    Ok(Json(state.events.get(&id).await?))
}

pub async fn create_event(
    State(state): State<AppState>,
    Json(payload): Json<EventInput>,
) -> Result<(StatusCode, Json<Event>)> {
    let event = state.events.add(payload).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<EventInput>,
) -> Result<Json<Event>> {
    Ok(Json(state.events.update(&id, payload).await?))
}

pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Event>> {
    Ok(Json(state.events.delete(&id).await?))
}
