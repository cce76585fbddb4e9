use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

use crate::response::ok;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/config", get(ui_config))
}

async fn ui_config(State(state): State<AppState>) -> impl IntoResponse {
    ok(state.ui())
}
