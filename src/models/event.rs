use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::loose;

// Main Event model - tolerant of whatever shape the admin UI or backend sends
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    #[serde(default, deserialize_with = "loose::id")]
    pub id: String,

    #[serde(default, alias = "nama_acara", alias = "name")]
    pub title: String,

    #[serde(default, alias = "start_date", alias = "tanggal_mulai", deserialize_with = "loose::text")]
    pub start: Option<String>,

    #[serde(default, alias = "end_date", alias = "tanggal_selesai", deserialize_with = "loose::text")]
    pub end: Option<String>,

    #[serde(default, alias = "ticket_price", alias = "harga", deserialize_with = "loose::text")]
    pub price: Option<String>,

    #[serde(default, alias = "createdAt", deserialize_with = "loose::text")]
    pub created_at: Option<String>,

    #[serde(default, alias = "kategori", deserialize_with = "loose::text")]
    pub category: Option<String>,
}

impl Event {
    pub fn start_at(&self) -> Option<DateTime<Utc>> {
        loose::parse_timestamp(self.start.as_deref())
    }

    pub fn end_at(&self) -> Option<DateTime<Utc>> {
        loose::parse_timestamp(self.end.as_deref())
    }

    /// End if present, otherwise start.
    pub fn effective_end(&self) -> Option<DateTime<Utc>> {
        self.end_at().or_else(|| self.start_at())
    }

    /// Creation time if present, otherwise start.
    pub fn created_or_start(&self) -> Option<DateTime<Utc>> {
        loose::parse_timestamp(self.created_at.as_deref()).or_else(|| self.start_at())
    }

    pub fn ticket_price(&self) -> f64 {
        loose::parse_price(self.price.as_deref())
    }
}

// For creating and editing events from the admin dashboard
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EventInput {
    #[validate(length(min = 1, message = "Event title is required"))]
    pub title: String,

    #[serde(default, deserialize_with = "loose::text")]
    #[validate(required(message = "Start date is required"))]
    pub start: Option<String>,

    #[serde(default, deserialize_with = "loose::text")]
    pub end: Option<String>,

    #[serde(default, deserialize_with = "loose::text")]
    pub price: Option<String>,

    #[serde(default, deserialize_with = "loose::text")]
    pub category: Option<String>,
}

impl EventInput {
    /// Trims the title so a blank one fails the length check.
    pub fn trimmed(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self
    }

    pub fn into_event(self, id: String, created_at: String) -> Event {
        Event {
            id,
            title: self.title,
            start: self.start,
            end: self.end,
            price: self.price,
            created_at: Some(created_at),
            category: self.category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_backend_shape() {
        let event: Event = serde_json::from_str(
            r#"{"id": 3, "nama_acara": "Jazz Night", "tanggal_mulai": "2025-03-01",
                "harga": "150000", "kategori": "music"}"#,
        )
        .unwrap();

        assert_eq!(event.id, "3");
        assert_eq!(event.title, "Jazz Night");
        assert_eq!(event.ticket_price(), 150000.0);
        assert_eq!(event.effective_end(), event.start_at());
        assert_eq!(event.category.as_deref(), Some("music"));
    }

    #[test]
    fn input_requires_title_and_start() {
        let input: EventInput = serde_json::from_str(r#"{"title": ""}"#).unwrap();
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("start"));
    }

    #[test]
    fn blank_title_fails_once_trimmed() {
        let input: EventInput =
            serde_json::from_str(r#"{"title": "   ", "start": "2025-03-01"}"#).unwrap();
        assert!(input.validate().is_ok());
        let errors = input.trimmed().validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
    }
}
