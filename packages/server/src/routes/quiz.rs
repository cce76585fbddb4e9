use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use times_algo::FactRecord;

use crate::response::{ok, AppError};
use crate::state::AppState;
use crate::views::{QuestionCard, SummaryView};

#[derive(Debug, Deserialize)]
struct AnswerRequest {
    correct: bool,
}

#[derive(Debug, Deserialize)]
struct JumpRequest {
    a: u32,
    b: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnswerResponse {
    recorded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    record: Option<FactRecord>,
    summary: SummaryView,
    /// Client waits this long before calling `/next`
    advance_after_ms: u64,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/question", get(current_question))
        .route("/next", post(next_question))
        .route("/reveal", post(reveal_answer))
        .route("/answer", post(submit_answer))
        .route("/jump", post(jump_to))
}

async fn current_question(State(state): State<AppState>) -> impl IntoResponse {
    let trainer = state.trainer();
    ok(QuestionCard::from_current(trainer.current()))
}

async fn next_question(State(state): State<AppState>) -> impl IntoResponse {
    let mut trainer = state.trainer();
    trainer.next_question();
    ok(QuestionCard::from_current(trainer.current()))
}

async fn reveal_answer(State(state): State<AppState>) -> impl IntoResponse {
    let mut trainer = state.trainer();
    trainer.reveal_answer();
    ok(QuestionCard::from_current(trainer.current()))
}

async fn submit_answer(
    State(state): State<AppState>,
    payload: Result<Json<AnswerRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    let mut trainer = state.trainer();
    let record = trainer.record_answer(payload.correct)?;

    Ok(ok(AnswerResponse {
        recorded: record.is_some(),
        record,
        summary: trainer.summary().into(),
        advance_after_ms: state.ui().advance_delay_ms,
    }))
}

async fn jump_to(
    State(state): State<AppState>,
    payload: Result<Json<JumpRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    let (a, b) = match (u8::try_from(payload.a), u8::try_from(payload.b)) {
        (Ok(a), Ok(b)) => (a, b),
        _ => {
            return Err(AppError::validation(format!(
                "operands must be between 1 and 10, got {} and {}",
                payload.a, payload.b
            )))
        }
    };

    let mut trainer = state.trainer();
    trainer.jump_to(a, b)?;
    Ok(ok(QuestionCard::from_current(trainer.current())))
}
