//! Presentation view models.
//!
//! Everything the browser renders verbatim (prompts, pill labels, tooltips,
//! popover text) is built here so route handlers only move data.

use serde::Serialize;

use times_algo::{
    CellState, CurrentQuestion, FactRecord, FilterSet, FilterTag, MasterySummary, MatrixCell,
    Question,
};

pub const NO_QUESTION_MESSAGE: &str = "No questions match filter.";

// ==================== Question Card ====================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub a: u8,
    pub b: u8,
    pub prompt: String,
    pub revealed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionCard {
    pub question: Option<QuestionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl QuestionCard {
    pub fn from_current(current: Option<&CurrentQuestion>) -> Self {
        match current {
            Some(current) => Self {
                question: Some(QuestionView {
                    a: current.question.a,
                    b: current.question.b,
                    prompt: question_prompt(&current.question),
                    revealed: current.revealed,
                    answer: current.revealed.then(|| answer_text(&current.question)),
                }),
                message: None,
            },
            None => Self {
                question: None,
                message: Some(NO_QUESTION_MESSAGE),
            },
        }
    }
}

pub fn question_prompt(q: &Question) -> String {
    format!("{} × {} = ?", q.a, q.b)
}

pub fn answer_text(q: &Question) -> String {
    format!("= {}", q.product())
}

// ==================== Filter Pills ====================

#[derive(Debug, Clone, Serialize)]
pub struct PillView {
    pub label: String,
    pub value: String,
    pub active: bool,
}

pub fn pill_label(tag: FilterTag) -> String {
    match tag {
        FilterTag::All => "All".to_string(),
        FilterTag::Factor(v) => format!("{v}×"),
    }
}

pub fn filter_pills(filters: &FilterSet) -> Vec<PillView> {
    FilterTag::every()
        .map(|tag| PillView {
            label: pill_label(tag),
            value: tag.to_string(),
            active: filters.contains(tag),
        })
        .collect()
}

// ==================== Progress ====================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryView {
    pub mastered: usize,
    pub total: usize,
    pub total_correct: u64,
    pub total_wrong: u64,
    /// Header line, e.g. "12 / 55 mastered"
    pub headline: String,
}

impl From<MasterySummary> for SummaryView {
    fn from(s: MasterySummary) -> Self {
        Self {
            mastered: s.mastered_count,
            total: s.total_facts,
            total_correct: s.total_correct,
            total_wrong: s.total_wrong,
            headline: format!("{} / {} mastered", s.mastered_count, s.total_facts),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixCellView {
    pub row: u8,
    pub col: u8,
    pub product: u32,
    pub state: CellState,
    pub correct: u32,
    pub wrong: u32,
    pub tooltip: String,
}

impl From<MatrixCell> for MatrixCellView {
    fn from(cell: MatrixCell) -> Self {
        Self {
            row: cell.row,
            col: cell.col,
            product: cell.product,
            state: cell.state,
            correct: cell.record.correct,
            wrong: cell.record.wrong,
            tooltip: cell_tooltip(cell.row, cell.col, &cell.record),
        }
    }
}

/// Desktop hover title for a matrix cell
pub fn cell_tooltip(a: u8, b: u8, record: &FactRecord) -> String {
    if record.attempts() > 0 {
        format!("{a}×{b} – ✓{} ✗{}", record.correct, record.wrong)
    } else {
        format!("{a}×{b} – not practiced")
    }
}

/// Long-press popover text for a matrix cell
pub fn popover_text(a: u8, b: u8, record: &FactRecord) -> String {
    if record.attempts() > 0 {
        format!("{a}×{b}  ✓ {}  ✗ {}", record.correct, record.wrong)
    } else {
        format!("{a}×{b}  not practiced yet")
    }
}
