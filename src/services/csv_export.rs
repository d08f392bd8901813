use std::fmt::Write;

use crate::models::event::Event;
use crate::models::participant::Participant;
use crate::services::dashboard::{event_revenue, participant_counts};

const HEADER: &str = "id,title,category,start,end,price,participants,revenue";

fn field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// One row per event with its participant count and revenue.
pub fn export_events_csv(events: &[Event], participants: &[Participant]) -> String {
    let counts = participant_counts(participants);
    let mut out = String::from(HEADER);
    out.push('\n');

    for event in events {
        let count = counts.get(event.id.as_str()).copied().unwrap_or(0);
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{},{}",
            field(&event.id),
            field(&event.title),
            field(event.category.as_deref().unwrap_or("")),
            field(event.start.as_deref().unwrap_or("")),
            field(event.end.as_deref().unwrap_or("")),
            event.ticket_price(),
            count,
            event_revenue(event, count),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_and_counts() {
        let events = vec![Event {
            id: "1".to_string(),
            title: "Rock, \"Live\"".to_string(),
            start: Some("2025-03-01".to_string()),
            end: None,
            price: Some("100000".to_string()),
            created_at: None,
            category: None,
        }];
        let participants = vec![Participant::new("a", "1"), Participant::new("b", "1")];

        let csv = export_events_csv(&events, &participants);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines[1], "1,\"Rock, \"\"Live\"\"\",,2025-03-01,,100000,2,200000");
    }

    #[test]
    fn empty_export_is_header_only() {
        assert_eq!(export_events_csv(&[], &[]), format!("{}\n", HEADER));
    }
}
