#![allow(dead_code)]

use std::path::Path;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use times_algo::{MemoryStore, TrainerOptions};
use times_server::config::UiTimings;
use times_server::state::AppState;
use times_server::storage::FileStore;

pub const TEST_SEED: u64 = 42;

pub fn memory_state() -> AppState {
    AppState::new(
        Box::new(MemoryStore::new()),
        TrainerOptions {
            seed: Some(TEST_SEED),
        },
        UiTimings::default(),
    )
}

pub fn file_state(dir: &Path) -> AppState {
    let store = FileStore::open(dir).expect("open file store");
    AppState::new(
        Box::new(store),
        TrainerOptions {
            seed: Some(TEST_SEED),
        },
        UiTimings::default(),
    )
}

pub fn create_test_app() -> Router {
    times_server::create_app(memory_state())
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, uri, &body.to_string()).await
}

pub async fn post_raw(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}
