use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;

use times_algo::{is_valid_operand, CellState, MAX_OPERAND};

use crate::response::{ok, AppError};
use crate::state::AppState;
use crate::views::{popover_text, MatrixCellView, QuestionCard, SummaryView};

#[derive(Debug, Serialize)]
struct MatrixResponse {
    size: u8,
    cells: Vec<MatrixCellView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FactDetailResponse {
    a: u8,
    b: u8,
    correct: u32,
    wrong: u32,
    state: CellState,
    weight: f64,
    text: String,
}

#[derive(Debug, Serialize)]
struct ResetResponse {
    summary: SummaryView,
    card: QuestionCard,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/summary", get(get_summary))
        .route("/matrix", get(get_matrix))
        .route("/facts/:a/:b", get(get_fact))
        .route("/reset", post(reset_progress))
}

async fn get_summary(State(state): State<AppState>) -> impl IntoResponse {
    let summary = state.trainer().summary();
    ok(SummaryView::from(summary))
}

async fn get_matrix(State(state): State<AppState>) -> impl IntoResponse {
    let cells = state.trainer().matrix();
    ok(MatrixResponse {
        size: MAX_OPERAND,
        cells: cells.into_iter().map(MatrixCellView::from).collect(),
    })
}

async fn get_fact(
    State(state): State<AppState>,
    path: Result<Path<(u8, u8)>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path((a, b)) = path?;
    if !is_valid_operand(a) || !is_valid_operand(b) {
        return Err(AppError::validation(format!(
            "operands must be between 1 and 10, got {a} and {b}"
        )));
    }

    let trainer = state.trainer();
    let record = trainer.record(a, b);
    Ok(ok(FactDetailResponse {
        a,
        b,
        correct: record.correct,
        wrong: record.wrong,
        state: trainer.cell_state(a, b),
        weight: trainer.weight(a, b),
        text: popover_text(a, b, &record),
    }))
}

async fn reset_progress(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let mut trainer = state.trainer();
    trainer.reset_all()?;
    Ok(ok(ResetResponse {
        summary: trainer.summary().into(),
        card: QuestionCard::from_current(trainer.current()),
    }))
}
