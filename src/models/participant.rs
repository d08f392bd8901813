use serde::{Deserialize, Serialize};

use crate::models::loose;

// One row of the attendance list (`daftar hadir`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Participant {
    #[serde(default, deserialize_with = "loose::id")]
    pub id: String,

    #[serde(default, alias = "acara_id", alias = "eventId", deserialize_with = "loose::id")]
    pub event_id: String,

    #[serde(default, alias = "nama", deserialize_with = "loose::text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Participant {
    pub fn new(id: impl Into<String>, event_id: impl Into<String>) -> Self {
        Participant {
            id: id.into(),
            event_id: event_id.into(),
            name: None,
        }
    }
}
