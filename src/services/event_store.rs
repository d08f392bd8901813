use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;
use validator::Validate;

use crate::errors::{AppError, Result};
use crate::models::event::{Event, EventInput};

/// The events collection behind the admin dashboard.
#[derive(Clone, Default)]
pub struct EventStore {
    events: Arc<RwLock<Vec<Event>>>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: Vec<Event>) -> Self {
        EventStore {
            events: Arc::new(RwLock::new(events)),
        }
    }

    pub async fn list(&self) -> Vec<Event> {
        self.events.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Result<Event> {
        self.events
            .read()
            .await
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Event {} not found", id)))
    }

    pub async fn add(&self, input: EventInput) -> Result<Event> {
        let input = input.trimmed();
        input.validate()?;
        let event = input.into_event(Uuid::new_v4().to_string(), Utc::now().to_rfc3339());
        self.events.write().await.push(event.clone());
        tracing::info!("Event {} created: {}", event.id, event.title);
        Ok(event)
    }

    /// Replaces the editable fields; id and creation time stay.
    pub async fn update(&self, id: &str, input: EventInput) -> Result<Event> {
        let input = input.trimmed();
        input.validate()?;
        let mut events = self.events.write().await;
        let slot = events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| AppError::not_found(format!("Event {} not found", id)))?;

        let created_at = slot.created_at.clone().unwrap_or_else(|| Utc::now().to_rfc3339());
        *slot = input.into_event(slot.id.clone(), created_at);
        tracing::info!("Event {} updated", id);
        Ok(slot.clone())
    }

    pub async fn delete(&self, id: &str) -> Result<Event> {
        let mut events = self.events.write().await;
        let index = events
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| AppError::not_found(format!("Event {} not found", id)))?;
        let removed = events.remove(index);
        tracing::info!("Event {} deleted", id);
        Ok(removed)
    }
}
