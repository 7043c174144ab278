mod common;

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::json;
use tokio::time::sleep;

use common::{TestApp, members};
use luck_center_back::services::cues::Cue;

/// One draw step with the default timings (16 + 300 + 50 ms).
const STEP: Duration = Duration::from_millis(366);

fn roster(n: usize) -> String {
    (0..n).map(|i| format!("player{i}")).collect::<Vec<_>>().join("\n")
}

async fn wait_steps(steps: u32) {
    sleep(STEP * steps + Duration::from_millis(50)).await;
}

#[tokio::test(start_paused = true)]
async fn generate_reveals_every_player_then_settles() {
    let app = TestApp::new();
    let (status, body) = app
        .post(
            "/teams/generate",
            json!({ "players": "Ali\nVeli\n\n  Can \nCem", "team_count": 2 }),
        )
        .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["total"], 4);
    assert_eq!(body["team_count"], 2);
    assert_eq!(body["estimated_duration_ms"], 4 * 366);

    let (_, during) = app.get("/teams").await;
    assert_eq!(during["drawing"], true);
    assert_eq!(during["teams"].as_array().unwrap().len(), 2);

    wait_steps(4).await;

    let (status, after) = app.get("/teams").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after["drawing"], false);

    let teams = members(&after);
    assert_eq!(teams[0].len(), 2);
    assert_eq!(teams[1].len(), 2);
    let mut everyone: Vec<String> = teams.concat();
    everyone.sort();
    assert_eq!(everyone, vec!["Ali", "Can", "Cem", "Veli"]);
    assert_eq!(after["teams"][0]["name"], "Team 1");
    assert_eq!(app.cues.played(), vec![Cue::Whoosh]);
}

#[tokio::test(start_paused = true)]
async fn custom_team_names_are_used_by_position() {
    let app = TestApp::new();
    app.post(
        "/teams/generate",
        json!({ "players": roster(3), "team_count": 3, "team_names": ["Red", " ", "Blue"] }),
    )
    .await;
    wait_steps(3).await;

    let (_, teams) = app.get("/teams").await;
    assert_eq!(teams["teams"][0]["name"], "Red");
    assert_eq!(teams["teams"][1]["name"], "Team 2");
    assert_eq!(teams["teams"][2]["name"], "Blue");
}

#[tokio::test(start_paused = true)]
async fn invalid_requests_are_rejected() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/teams/generate", json!({ "players": roster(4), "team_count": 0 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("team count"));

    let (status, _) = app
        .post("/teams/generate", json!({ "players": roster(4), "team_count": -3 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post("/teams/generate", json!({ "players": roster(2), "team_count": 3 }))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // Nothing was started by the rejected requests.
    let (_, teams) = app.get("/teams").await;
    assert_eq!(teams["drawing"], false);
    assert!(teams["teams"].as_array().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn only_one_draw_at_a_time_and_no_edits_while_drawing() {
    let app = TestApp::new();
    let body = json!({ "players": roster(4), "team_count": 2 });

    let (status, _) = app.post("/teams/generate", body.clone()).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    let (status, _) = app.post("/teams/generate", body.clone()).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .post("/teams/move", json!({ "from_team": 0, "from_index": 0, "to_team": 1 }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    let (status, _) = app.post_empty("/teams/reset").await;
    assert_eq!(status, StatusCode::CONFLICT);

    wait_steps(4).await;
    let (status, _) = app.post("/teams/generate", body).await;
    assert_eq!(status, StatusCode::ACCEPTED);
}

#[tokio::test(start_paused = true)]
async fn draw_events_are_published_in_step_order() {
    let app = TestApp::new();
    let mut events = app.state.public_sse().subscribe();

    app.post("/teams/generate", json!({ "players": roster(3), "team_count": 2 }))
        .await;
    wait_steps(3).await;

    let mut names = Vec::new();
    let mut steps = Vec::new();
    while let Ok(event) = events.try_recv() {
        let name = event.event.unwrap_or_default();
        if name == "draw.flight" {
            let data: serde_json::Value = serde_json::from_str(&event.data).unwrap();
            steps.push(data["step"].as_u64().unwrap());
            assert_eq!(data["total"], 3);
        }
        names.push(name);
    }

    assert_eq!(
        names,
        vec![
            "draw.started",
            "draw.flight",
            "draw.arrived",
            "draw.committed",
            "draw.flight",
            "draw.arrived",
            "draw.committed",
            "draw.flight",
            "draw.arrived",
            "draw.committed",
            "draw.finished",
        ]
    );
    assert_eq!(steps, vec![0, 1, 2]);
}

#[tokio::test(start_paused = true)]
async fn cancelled_draw_keeps_committed_players() {
    let app = TestApp::new();
    let mut events = app.state.public_sse().subscribe();

    app.post("/teams/generate", json!({ "players": roster(6), "team_count": 2 }))
        .await;
    // Inside the second step.
    sleep(Duration::from_millis(400)).await;

    let (status, _) = app.post_empty("/teams/draw/cancel").await;
    assert_eq!(status, StatusCode::OK);
    wait_steps(6).await;

    let (_, teams) = app.get("/teams").await;
    assert_eq!(teams["drawing"], false);
    let placed: usize = members(&teams).iter().map(Vec::len).sum();
    assert_eq!(placed, 2);

    let mut last = None;
    while let Ok(event) = events.try_recv() {
        last = Some(event);
    }
    let last = last.unwrap();
    assert_eq!(last.event.as_deref(), Some("draw.cancelled"));
    let data: serde_json::Value = serde_json::from_str(&last.data).unwrap();
    assert_eq!(data["committed"], 2);
    assert_eq!(data["total"], 6);

    let (status, _) = app.post_empty("/teams/draw/cancel").await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test(start_paused = true)]
async fn manual_edits_after_the_draw() {
    let app = TestApp::new();
    app.post("/teams/generate", json!({ "players": roster(4), "team_count": 2 }))
        .await;
    wait_steps(4).await;
    let (_, before) = app.get("/teams").await;
    let before = members(&before);

    let (status, moved) = app
        .post("/teams/move", json!({ "from_team": 0, "from_index": 0, "to_team": 1 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    let moved = members(&moved);
    assert_eq!(moved[0].len(), 1);
    assert_eq!(moved[1].len(), 3);
    assert_eq!(moved[1].last(), before[0].first());

    let (status, _) = app
        .post("/teams/move", json!({ "from_team": 0, "from_index": 5, "to_team": 1 }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, removed) = app.delete("/teams/1/members/0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(members(&removed)[1].len(), 2);
    assert_eq!(removed["teams"][1]["members"][0]["position"], 1);
    assert_eq!(app.cues.played().last(), Some(&Cue::Click));

    let (status, _) = app.delete("/teams/7/members/0").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, reset) = app.post_empty("/teams/reset").await;
    assert_eq!(status, StatusCode::OK);
    assert!(reset["teams"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn preview_and_sample_roster() {
    let app = TestApp::new();

    let (status, sample) = app.get("/teams/sample").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sample["players"], "Ali\nVeli\nCan\nCem\nEfe\nEge");

    let (_, preview) = app
        .post("/teams/preview", json!({ "players": "Ali\n \nVeli", "team_count": 3 }))
        .await;
    assert_eq!(preview["player_count"], 2);
    assert_eq!(preview["team_count"], 3);
    assert_eq!(preview["can_generate"], false);
}
