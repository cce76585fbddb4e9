//! Mastery Classification
//!
//! Pure functions over a single [`FactRecord`]:
//! - `weight` - sampling weight used by the question selector
//! - `cell_state` - display bucket for the mastery matrix
//! - `is_mastered` - whether the fact counts toward the mastered total
//!
//! Branch order matters. A fact with mistakes is never suppressed, however many
//! correct answers it has, because the `wrong > 0` check runs before the
//! settled check.

use crate::types::{
    CellState, FactRecord, LEARNING_WEIGHT, RECOVERING_WEIGHT, SETTLED_CORRECT_THRESHOLD,
    SETTLED_WEIGHT, STRUGGLING_WEIGHT, UNSEEN_WEIGHT,
};

/// Sampling weight of a fact.
///
/// | condition (first match wins) | weight |
/// |------------------------------|--------|
/// | never answered               | 2.0    |
/// | wrong > correct              | 5.0    |
/// | wrong > 0                    | 3.0    |
/// | correct >= 3                 | 0.5    |
/// | otherwise                    | 1.0    |
pub fn weight(record: &FactRecord) -> f64 {
    if record.is_unseen() {
        return UNSEEN_WEIGHT;
    }
    if record.wrong > record.correct {
        return STRUGGLING_WEIGHT;
    }
    if record.wrong > 0 {
        return RECOVERING_WEIGHT;
    }
    if record.correct >= SETTLED_CORRECT_THRESHOLD {
        return SETTLED_WEIGHT;
    }
    LEARNING_WEIGHT
}

pub fn cell_state(record: &FactRecord) -> CellState {
    if record.is_unseen() {
        CellState::Never
    } else if record.wrong > record.correct {
        CellState::Red
    } else if record.wrong == record.correct {
        CellState::Orange
    } else {
        CellState::Green
    }
}

/// Strictly more correct than wrong answers. Unseen facts are not mastered.
pub fn is_mastered(record: &FactRecord) -> bool {
    record.correct > record.wrong
}
