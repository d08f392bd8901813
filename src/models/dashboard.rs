use serde::{Deserialize, Serialize};

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyStat {
    pub month: String,
    pub events: usize,
    pub participants: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopEvent {
    pub id: String,
    pub title: String,
    pub participants: usize,
    pub revenue: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Registration,
    Creation,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecentActivity {
    pub event_id: String,
    pub title: String,
    pub kind: ActivityKind,
    pub participants: usize,
    /// "3 days ago", "5 hours ago" or "just now".
    pub time_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSnapshot {
    pub total_events: usize,
    pub total_participants: usize,
    pub active_events: usize,
    pub total_revenue: f64,
    pub admin_income: f64,
    pub organizer_income: f64,
    pub monthly_stats: Vec<MonthlyStat>,
    pub top_events: Vec<TopEvent>,
    pub recent_activity: Vec<RecentActivity>,
}
