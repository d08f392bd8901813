mod common;

use chrono::{Datelike, Utc};
use common::{FakeBackend, TestApp};
use serde_json::json;
use ticket_console::models::event::Event;
use ticket_console::models::participant::Participant;
use ticket_console::services::event_store::EventStore;

fn seeded_event(id: &str, price: &str, start: String) -> Event {
    Event {
        id: id.to_string(),
        title: format!("Event {}", id),
        start: Some(start),
        end: None,
        price: Some(price.to_string()),
        created_at: None,
        category: Some("music".to_string()),
    }
}

#[tokio::test]
async fn dashboard_aggregates_store_and_participants() {
    let year = Utc::now().year();
    let events = EventStore::with_events(vec![
        seeded_event("1", "100000", format!("{}-01-01", year)),
        seeded_event("2", "50000", format!("{}-01-01", year + 1)),
    ]);
    let participants = vec![
        Participant::new("p1", "1"),
        Participant::new("p2", "2"),
        Participant::new("p3", "2"),
        Participant::new("p4", "missing"),
    ];
    let app = TestApp::with_events(FakeBackend::with_participants(participants), events);

    let (status, body) = app.send("GET", "/api/dashboard", None).await;
    assert_eq!(status, 200, "{}", body);
    assert_eq!(body["total_events"], 2);
    assert_eq!(body["total_participants"], 4);
    assert_eq!(body["active_events"], 1);
    assert_eq!(body["total_revenue"], 200000.0);
    assert_eq!(body["admin_income"], 20000.0);
    assert_eq!(body["organizer_income"], 180000.0);
    assert_eq!(body["monthly_stats"][0]["month"], "Jan");
    assert_eq!(body["monthly_stats"][0]["events"], 1);
    assert_eq!(body["monthly_stats"][0]["participants"], 1);
    assert_eq!(body["top_events"][0]["id"], "2");
    assert_eq!(body["recent_activity"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn empty_dashboard() {
    let app = TestApp::new(FakeBackend::default());
    let (status, body) = app.send("GET", "/api/dashboard", None).await;
    assert_eq!(status, 200);
    assert_eq!(body["total_events"], 0);
    assert_eq!(body["total_revenue"], 0.0);
    assert_eq!(body["top_events"], json!([]));
    assert_eq!(body["recent_activity"], json!([]));
    assert_eq!(body["monthly_stats"].as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn event_crud_feeds_dashboard() {
    let app = TestApp::new(FakeBackend::default());

    let (status, created) = app
        .send(
            "POST",
            "/api/events",
            Some(json!({"title": "Konser Amal", "start": "2030-05-01", "price": 25000})),
        )
        .await;
    assert_eq!(status, 201, "{}", created);
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["price"], "25000");

    let (status, _) = app
        .send(
            "PUT",
            &format!("/api/events/{}", id),
            Some(json!({"title": "Konser Amal 2030", "start": "2030-05-02"})),
        )
        .await;
    assert_eq!(status, 200);

    let (_, fetched) = app.send("GET", &format!("/api/events/{}", id), None).await;
    assert_eq!(fetched["title"], "Konser Amal 2030");
    assert_eq!(fetched["created_at"], created["created_at"]);

    let (_, dashboard) = app.send("GET", "/api/dashboard", None).await;
    assert_eq!(dashboard["total_events"], 1);
    assert_eq!(dashboard["active_events"], 1);
    assert_eq!(dashboard["recent_activity"][0]["kind"], "creation");
    assert_eq!(dashboard["recent_activity"][0]["time_label"], "just now");

    let (status, _) = app.send("DELETE", &format!("/api/events/{}", id), None).await;
    assert_eq!(status, 200);
    let (status, _) = app.send("GET", &format!("/api/events/{}", id), None).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn invalid_event_is_rejected() {
    let app = TestApp::new(FakeBackend::default());
    let (status, body) = app
        .send("POST", "/api/events", Some(json!({"title": "No date"})))
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["message"], "Start date is required");
}

#[tokio::test]
async fn csv_export() {
    let events = EventStore::with_events(vec![seeded_event("1", "100000", "2025-03-01".into())]);
    let app = TestApp::with_events(
        FakeBackend::with_participants(vec![Participant::new("p1", "1")]),
        events,
    );

    let (status, content_type, body) = app.send_raw("/api/dashboard/export.csv").await;
    assert_eq!(status, 200);
    assert!(content_type.starts_with("text/csv"));
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1], "1,Event 1,music,2025-03-01,,100000,1,100000");
}

#[tokio::test]
async fn participants_are_proxied() {
    let app = TestApp::new(FakeBackend::with_participants(vec![
        Participant::new("p1", "1"),
        Participant::new("p2", "1"),
    ]));
    let (status, body) = app.send("GET", "/api/participants", None).await;
    assert_eq!(status, 200);
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0]["event_id"], "1");
}

#[tokio::test]
async fn health() {
    let app = TestApp::new(FakeBackend::default());
    let (status, body) = app.send("GET", "/health", None).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");
}
