use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/info", get(info))
        .route("/live", get(live))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthInfoResponse {
    service: &'static str,
    version: &'static str,
    start_time: String,
    uptime: u64,
    records: usize,
}

#[derive(Serialize)]
struct LivenessResponse {
    status: &'static str,
    timestamp: String,
    uptime: u64,
}

async fn root() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        timestamp: now_iso(),
    })
}

async fn info(State(state): State<AppState>) -> impl IntoResponse {
    let records = state.trainer().facts().len();
    Json(HealthInfoResponse {
        service: "times-server",
        version: env!("CARGO_PKG_VERSION"),
        start_time: system_time_iso(state.started_at_system()),
        uptime: state.uptime_seconds(),
        records,
    })
}

async fn live(State(state): State<AppState>) -> impl IntoResponse {
    Json(LivenessResponse {
        status: "healthy",
        timestamp: now_iso(),
        uptime: state.uptime_seconds(),
    })
}

fn system_time_iso(time: std::time::SystemTime) -> String {
    let datetime: chrono::DateTime<chrono::Utc> = time.into();
    datetime.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
