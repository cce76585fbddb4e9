use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use times_algo::FilterTag;

use crate::response::{ok, AppError};
use crate::state::AppState;
use crate::views::{filter_pills, PillView, QuestionCard};

#[derive(Debug, Deserialize)]
struct ToggleRequest {
    value: String,
}

#[derive(Debug, Serialize)]
struct FiltersResponse {
    pills: Vec<PillView>,
}

#[derive(Debug, Serialize)]
struct ToggleResponse {
    pills: Vec<PillView>,
    card: QuestionCard,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_filters))
        .route("/toggle", post(toggle_filter))
}

async fn list_filters(State(state): State<AppState>) -> impl IntoResponse {
    let trainer = state.trainer();
    ok(FiltersResponse {
        pills: filter_pills(trainer.filters()),
    })
}

async fn toggle_filter(
    State(state): State<AppState>,
    payload: Result<Json<ToggleRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    let tag: FilterTag = payload
        .value
        .parse()
        .map_err(|err: times_algo::ParseFilterError| AppError::validation(err.to_string()))?;

    let mut trainer = state.trainer();
    trainer.toggle_filter(tag);

    Ok(ok(ToggleResponse {
        pills: filter_pills(trainer.filters()),
        card: QuestionCard::from_current(trainer.current()),
    }))
}
