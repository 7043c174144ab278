mod common;

use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tokio::{sync::broadcast, time::sleep};
use tower::ServiceExt;

use common::{TestApp, members};
use luck_center_back::{
    dto::sse::ServerEvent,
    services::health_service,
    state::wheel::{self, SAMPLE_WHEEL_NAMES},
};

/// Split one `text/event-stream` block into its event name and JSON data.
fn parse_block(block: &str) -> (String, Value) {
    let mut name = String::new();
    let mut data = String::new();
    for line in block.lines() {
        match line.split_once(':') {
            Some(("event", value)) => name = value.trim().to_string(),
            Some(("data", value)) => data.push_str(value.trim()),
            _ => {}
        }
    }
    (name, serde_json::from_str(&data).unwrap())
}

/// Open `/sse` and return the first event written to the response body.
async fn first_stream_event(app: &TestApp) -> (String, Value) {
    let request = Request::builder().uri("/sse").body(Body::empty()).unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "text/event-stream");

    let mut body = response.into_body();
    let frame = body.frame().await.unwrap().unwrap();
    let Ok(bytes) = frame.into_data() else {
        panic!("expected a data frame");
    };
    parse_block(std::str::from_utf8(&bytes).unwrap())
}

fn drain(events: &mut broadcast::Receiver<ServerEvent>) -> Vec<(String, Value)> {
    let mut received = Vec::new();
    while let Ok(event) = events.try_recv() {
        let data = serde_json::from_str(&event.data).unwrap_or(Value::String(event.data));
        received.push((event.event.unwrap_or_default(), data));
    }
    received
}

fn names(events: &[(String, Value)]) -> Vec<&str> {
    events.iter().map(|(name, _)| name.as_str()).collect()
}

#[tokio::test]
async fn stream_opens_with_a_handshake() {
    let app = TestApp::new();

    let (name, data) = first_stream_event(&app).await;
    assert_eq!(name, "handshake");
    assert_eq!(data["message"], "connected");
    assert_eq!(data["drawing"], false);
    assert_eq!(data["spinning"], false);
    assert_eq!(data["degraded"], false);
}

#[tokio::test(start_paused = true)]
async fn handshake_reports_a_running_draw() {
    let app = TestApp::new();
    app.post("/teams/generate", json!({ "players": "a\nb\nc", "team_count": 2 }))
        .await;

    let (name, data) = first_stream_event(&app).await;
    assert_eq!(name, "handshake");
    assert_eq!(data["drawing"], true);
    assert_eq!(data["spinning"], false);
}

#[tokio::test(start_paused = true)]
async fn manual_team_edits_publish_the_new_teams() {
    let app = TestApp::new();
    app.post(
        "/teams/generate",
        json!({ "players": "a\nb\nc\nd", "team_count": 2 }),
    )
    .await;
    sleep(Duration::from_millis(366 * 4 + 50)).await;

    let mut events = app.state.public_sse().subscribe();
    app.post("/teams/move", json!({ "from_team": 0, "from_index": 0, "to_team": 1 }))
        .await;
    app.delete("/teams/1/members/0").await;
    app.post_empty("/teams/reset").await;
    // A refused edit publishes nothing.
    app.delete("/teams/0/members/0").await;

    let received = drain(&mut events);
    assert_eq!(
        names(&received),
        vec!["teams.updated", "teams.updated", "teams.updated"]
    );

    let sizes = |data: &Value| -> Vec<usize> { members(data).iter().map(Vec::len).collect() };
    assert_eq!(sizes(&received[0].1), vec![1, 3]);
    assert_eq!(sizes(&received[1].1), vec![1, 2]);
    assert!(sizes(&received[2].1).is_empty());
    assert_eq!(received[0].1["teams"][1]["index"], 1);
}

#[tokio::test]
async fn wheel_edits_publish_names_and_segments() {
    let app = TestApp::new();
    let mut events = app.state.public_sse().subscribe();

    app.post("/wheel/names", json!({ "name": "Pizza" })).await;
    // A duplicate leaves the wheel untouched.
    app.post("/wheel/names", json!({ "name": "Pizza" })).await;
    app.post("/wheel/names", json!({ "name": "Sushi" })).await;

    let received = drain(&mut events);
    assert_eq!(names(&received), vec!["wheel.names", "wheel.names"]);
    assert_eq!(received[0].1["names"], json!(["Pizza"]));
    assert_eq!(received[1].1["names"], json!(["Pizza", "Sushi"]));
    assert_eq!(received[1].1["segments"], json!(["Pizza", "Sushi"]));
}

#[tokio::test(start_paused = true)]
async fn spin_publishes_start_and_winner() {
    let app = TestApp::new();
    app.post_empty("/wheel/names/sample").await;
    let mut events = app.state.public_sse().subscribe();

    let (status, started) = app.post_empty("/wheel/spin").await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let received = drain(&mut events);
    assert_eq!(names(&received), vec!["wheel.spin_started"]);
    let announced = &received[0].1;
    assert_eq!(announced["spin_id"], started["spin_id"]);
    assert_eq!(announced["duration_ms"], 4000);
    assert_eq!(announced["segments"], json!(SAMPLE_WHEEL_NAMES));
    let rotation = announced["rotation_degrees"].as_f64().unwrap();

    sleep(Duration::from_millis(4_100)).await;

    let received = drain(&mut events);
    assert_eq!(names(&received), vec!["wheel.spin_resolved"]);
    let resolved = &received[0].1;
    let expected = wheel::resolve(rotation, SAMPLE_WHEEL_NAMES.len()).unwrap();
    assert_eq!(resolved["spin_id"], started["spin_id"]);
    assert_eq!(resolved["winning_index"], expected);
    assert_eq!(resolved["winning_label"], SAMPLE_WHEEL_NAMES[expected]);
    assert_eq!(resolved["final_rotation_degrees"], rotation);
}

#[tokio::test]
async fn degraded_mode_is_reported_everywhere() {
    let app = TestApp::new();
    let mut events = app.state.public_sse().subscribe();

    health_service::enter_degraded(&app.state, "preferences kept in memory");

    let (status, health) = app.get("/healthcheck").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "degraded");

    let received = drain(&mut events);
    assert_eq!(names(&received), vec!["system.status", "info"]);
    assert_eq!(received[0].1, json!({ "degraded": true }));
    assert_eq!(received[1].1, "preferences kept in memory");

    let (name, data) = first_stream_event(&app).await;
    assert_eq!(name, "handshake");
    assert_eq!(data["degraded"], true);
}
