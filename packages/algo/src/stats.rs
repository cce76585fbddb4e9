//! Derived progress views, recomputed on every call.

use crate::mastery::{cell_state, is_mastered};
use crate::store::FactStore;
use crate::types::{Fact, MasterySummary, MatrixCell, MAX_OPERAND, MIN_OPERAND, TOTAL_FACTS};

pub fn summarize(store: &FactStore) -> MasterySummary {
    let mut summary = MasterySummary {
        mastered_count: 0,
        total_facts: TOTAL_FACTS,
        total_correct: 0,
        total_wrong: 0,
    };

    for fact in Fact::all() {
        let record = store.get_fact(&fact);
        summary.total_correct += u64::from(record.correct);
        summary.total_wrong += u64::from(record.wrong);
        if is_mastered(&record) {
            summary.mastered_count += 1;
        }
    }

    summary
}

/// The full 10x10 grid, row-major. Both `(r, c)` and `(c, r)` show the same record.
pub fn mastery_matrix(store: &FactStore) -> Vec<MatrixCell> {
    let mut cells = Vec::with_capacity(usize::from(MAX_OPERAND) * usize::from(MAX_OPERAND));
    for row in MIN_OPERAND..=MAX_OPERAND {
        for col in MIN_OPERAND..=MAX_OPERAND {
            let record = store.get(row, col);
            cells.push(MatrixCell {
                row,
                col,
                product: u32::from(row) * u32::from(col),
                record,
                state: cell_state(&record),
            });
        }
    }
    cells
}
