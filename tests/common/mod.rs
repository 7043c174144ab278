#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use luck_center_back::{
    config::AppConfig,
    dao::preference_store::{MemoryStore, PreferenceStore},
    routes,
    services::cues::{Cue, CuePlayer},
    state::{AppState, SharedState, SseHub, draw::DrawTimings, wheel::SpinSettings},
};

/// Cue player remembering every requested cue.
#[derive(Default)]
pub struct RecordingCues {
    played: Mutex<Vec<Cue>>,
}

impl RecordingCues {
    pub fn played(&self) -> Vec<Cue> {
        self.played.lock().unwrap().clone()
    }
}

impl CuePlayer for RecordingCues {
    fn play_cue(&self, cue: Cue) {
        self.played.lock().unwrap().push(cue);
    }
}

pub struct TestApp {
    pub state: SharedState,
    pub store: Arc<MemoryStore>,
    pub cues: Arc<RecordingCues>,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    pub fn with_store(store: Arc<MemoryStore>) -> Self {
        let config = AppConfig::in_memory(DrawTimings::default(), SpinSettings::default());
        let cues = Arc::new(RecordingCues::default());
        let dyn_store: Arc<dyn PreferenceStore> = store.clone();
        let state = AppState::with_cue_player(config, dyn_store, SseHub::new(256), cues.clone());
        let router = routes::router(state.clone());
        Self {
            state,
            store,
            cues,
            router,
        }
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn post_empty(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::POST, uri, None).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None).await
    }
}

/// Member names of every team in a `/teams` style payload.
pub fn members(teams: &Value) -> Vec<Vec<String>> {
    teams["teams"]
        .as_array()
        .unwrap()
        .iter()
        .map(|team| {
            team["members"]
                .as_array()
                .unwrap()
                .iter()
                .map(|member| member["name"].as_str().unwrap().to_string())
                .collect()
        })
        .collect()
}
