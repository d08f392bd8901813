// services/dashboard.rs
use std::collections::HashMap;

use chrono::{DateTime, Datelike, Utc};

use crate::models::dashboard::{
    ActivityKind, DashboardSnapshot, MonthlyStat, RecentActivity, TopEvent, MONTH_LABELS,
};
use crate::models::event::Event;
use crate::models::participant::Participant;

pub const ADMIN_SHARE: f64 = 0.10;
pub const TOP_EVENTS_LIMIT: usize = 10;
pub const RECENT_ACTIVITY_LIMIT: usize = 4;
/// More participants than this and an event reads as a registration burst.
pub const REGISTRATION_ACTIVITY_THRESHOLD: usize = 50;

/// Participants per event id. Participants without an event reference are skipped.
pub fn participant_counts(participants: &[Participant]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for participant in participants.iter().filter(|p| !p.event_id.is_empty()) {
        *counts.entry(participant.event_id.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Ticket price times participants; never negative.
pub fn event_revenue(event: &Event, participants: usize) -> f64 {
    event.ticket_price() * participants as f64
}

/// Splits revenue into (admin, organizer). The admin share is rounded to
/// cents and the organizer takes the remainder.
pub fn split_income(total_revenue: f64) -> (f64, f64) {
    let admin = (total_revenue * ADMIN_SHARE * 100.0).round() / 100.0;
    (admin, total_revenue - admin)
}

pub fn relative_time_label(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    let days = elapsed.num_days();
    if days >= 1 {
        return format!("{} {} ago", days, if days == 1 { "day" } else { "days" });
    }
    let hours = elapsed.num_hours();
    if hours >= 1 {
        return format!("{} {} ago", hours, if hours == 1 { "hour" } else { "hours" });
    }
    "just now".to_string()
}

pub fn aggregate(
    events: &[Event],
    participants: &[Participant],
    now: DateTime<Utc>,
) -> DashboardSnapshot {
    let counts = participant_counts(participants);
    let count_for = |event: &Event| counts.get(event.id.as_str()).copied().unwrap_or(0);

    let active_events = events
        .iter()
        .filter(|e| e.effective_end().map(|end| end > now).unwrap_or(false))
        .count();

    let total_revenue = events
        .iter()
        .map(|e| event_revenue(e, count_for(e)))
        .fold(0.0, |acc, revenue| acc + revenue);
    let (admin_income, organizer_income) = split_income(total_revenue);

    DashboardSnapshot {
        total_events: events.len(),
        total_participants: participants.len(),
        active_events,
        total_revenue,
        admin_income,
        organizer_income,
        monthly_stats: monthly_stats(events, participants, now),
        top_events: top_events(events, &count_for),
        recent_activity: recent_activity(events, &count_for, now),
    }
}

fn monthly_stats(
    events: &[Event],
    participants: &[Participant],
    now: DateTime<Utc>,
) -> Vec<MonthlyStat> {
    let mut stats: Vec<MonthlyStat> = MONTH_LABELS
        .iter()
        .map(|label| MonthlyStat {
            month: label.to_string(),
            events: 0,
            participants: 0,
        })
        .collect();

    // month index of every event that starts this year
    let mut event_month: HashMap<&str, usize> = HashMap::new();
    for event in events {
        if let Some(start) = event.start_at() {
            if start.year() == now.year() {
                let month = start.month0() as usize;
                stats[month].events += 1;
                event_month.insert(event.id.as_str(), month);
            }
        }
    }

    for participant in participants.iter().filter(|p| !p.event_id.is_empty()) {
        if let Some(&month) = event_month.get(participant.event_id.as_str()) {
            stats[month].participants += 1;
        }
    }

    stats
}

fn top_events(events: &[Event], count_for: &impl Fn(&Event) -> usize) -> Vec<TopEvent> {
    let mut ranked: Vec<(&Event, usize)> = events.iter().map(|e| (e, count_for(e))).collect();
    // sort_by is stable, ties keep input order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(TOP_EVENTS_LIMIT)
        .map(|(event, participants)| TopEvent {
            id: event.id.clone(),
            title: event.title.clone(),
            participants,
            revenue: event_revenue(event, participants),
        })
        .collect()
}

fn recent_activity(
    events: &[Event],
    count_for: &impl Fn(&Event) -> usize,
    now: DateTime<Utc>,
) -> Vec<RecentActivity> {
    let mut by_time: Vec<(&Event, Option<DateTime<Utc>>)> =
        events.iter().map(|e| (e, e.created_or_start())).collect();
    // None orders below Some, so undated events fall to the end
    by_time.sort_by(|a, b| b.1.cmp(&a.1));

    by_time
        .into_iter()
        .take(RECENT_ACTIVITY_LIMIT)
        .map(|(event, at)| {
            let participants = count_for(event);
            RecentActivity {
                event_id: event.id.clone(),
                title: event.title.clone(),
                kind: if participants > REGISTRATION_ACTIVITY_THRESHOLD {
                    ActivityKind::Registration
                } else {
                    ActivityKind::Creation
                },
                participants,
                time_label: at
                    .map(|t| relative_time_label(t, now))
                    .unwrap_or_else(|| "just now".to_string()),
            }
        })
        .collect()
}
