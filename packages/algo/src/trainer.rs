//! Trainer Session
//!
//! Owns every piece of mutable quiz state: the fact store, its persistence
//! backend, the active filter, the question in progress and the RNG. All
//! transitions go through `&mut self`, so one session is one logical thread
//! of control.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::filter::{FilterSet, FilterTag};
use crate::mastery;
use crate::persistence::{KeyValueStore, PersistenceError};
use crate::selector::select_question;
use crate::stats::{mastery_matrix, summarize};
use crate::store::FactStore;
use crate::types::{
    CellState, CurrentQuestion, Fact, FactRecord, MasterySummary, MatrixCell, Question,
    STORAGE_KEY,
};

#[derive(Error, Debug)]
pub enum TrainerError {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("operands must be between 1 and 10, got {a} and {b}")]
    InvalidOperands { a: u8, b: u8 },
}

pub type TrainerResult<T> = Result<T, TrainerError>;

#[derive(Clone, Debug, Default)]
pub struct TrainerOptions {
    /// Fixed RNG seed for reproducible draws; entropy when `None`
    pub seed: Option<u64>,
}

pub struct Trainer<S: KeyValueStore> {
    storage: S,
    facts: FactStore,
    filters: FilterSet,
    current: Option<CurrentQuestion>,
    rng: ChaCha8Rng,
}

impl<S: KeyValueStore> Trainer<S> {
    /// Restore the fact store from `storage`. Read or parse failures start fresh.
    pub fn load(storage: S, options: TrainerOptions) -> Self {
        let raw = match storage.read(STORAGE_KEY) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(error = %err, key = STORAGE_KEY, "failed to read fact store");
                None
            }
        };
        let facts = FactStore::load_from_persistent(raw.as_deref());

        let rng = match options.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        tracing::info!(records = facts.len(), seeded = options.seed.is_some(), "trainer loaded");

        Self {
            storage,
            facts,
            filters: FilterSet::all(),
            current: None,
            rng,
        }
    }

    // ========== Accessors ==========

    pub fn facts(&self) -> &FactStore {
        &self.facts
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn current(&self) -> Option<&CurrentQuestion> {
        self.current.as_ref()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn record(&self, a: u8, b: u8) -> FactRecord {
        self.facts.get(a, b)
    }

    pub fn weight(&self, a: u8, b: u8) -> f64 {
        mastery::weight(&self.facts.get(a, b))
    }

    pub fn cell_state(&self, a: u8, b: u8) -> CellState {
        mastery::cell_state(&self.facts.get(a, b))
    }

    pub fn summary(&self) -> MasterySummary {
        summarize(&self.facts)
    }

    pub fn matrix(&self) -> Vec<MatrixCell> {
        mastery_matrix(&self.facts)
    }

    // ========== Question Flow ==========

    /// Replace the current question with a fresh weighted draw.
    pub fn next_question(&mut self) -> Option<Question> {
        self.current = select_question(&self.filters, &self.facts, &mut self.rng).map(|fact| {
            CurrentQuestion {
                question: Question::from(fact),
                revealed: false,
            }
        });

        match &self.current {
            Some(current) => {
                tracing::debug!(a = current.question.a, b = current.question.b, "next question")
            }
            None => tracing::debug!("no question matches filter"),
        }
        self.current.map(|c| c.question)
    }

    /// Show the product. `None` without a question or once already revealed.
    pub fn reveal_answer(&mut self) -> Option<u32> {
        let current = self.current.as_mut()?;
        if current.revealed {
            return None;
        }
        current.revealed = true;
        Some(current.question.product())
    }

    /// Record the learner's self-assessment for the current question.
    ///
    /// Without a current question this is a no-op returning `Ok(None)`.
    pub fn record_answer(&mut self, correct: bool) -> TrainerResult<Option<FactRecord>> {
        let Some(current) = self.current else {
            tracing::debug!("answer without a current question ignored");
            return Ok(None);
        };
        let q = current.question;
        self.record_outcome(q.a, q.b, correct).map(Some)
    }

    /// Increment the fact's counter and persist the whole store.
    pub fn record_outcome(&mut self, a: u8, b: u8, correct: bool) -> TrainerResult<FactRecord> {
        let fact = Fact::new(a, b).ok_or(TrainerError::InvalidOperands { a, b })?;
        let record = self.facts.record_outcome(fact, correct);
        tracing::debug!(
            fact = %fact,
            correct,
            total_correct = record.correct,
            total_wrong = record.wrong,
            "outcome recorded"
        );
        self.persist()?;
        Ok(record)
    }

    /// Make `(a, b)` the current question, shown in that order, with the
    /// filter reset so the fact is reachable.
    pub fn jump_to(&mut self, a: u8, b: u8) -> TrainerResult<Question> {
        let question = Question::new(a, b).ok_or(TrainerError::InvalidOperands { a, b })?;
        self.filters.reset();
        self.current = Some(CurrentQuestion {
            question,
            revealed: false,
        });
        Ok(question)
    }

    pub fn toggle_filter(&mut self, tag: FilterTag) -> Option<Question> {
        self.filters.toggle(tag);
        tracing::debug!(filters = ?self.filters, "filter toggled");
        self.next_question()
    }

    /// Discard all progress, persist the empty store and draw a new question.
    pub fn reset_all(&mut self) -> TrainerResult<Option<Question>> {
        let discarded = self.facts.len();
        self.facts.clear();
        self.persist()?;
        tracing::info!(discarded, "progress reset");
        Ok(self.next_question())
    }

    fn persist(&mut self) -> TrainerResult<()> {
        let json = self.facts.to_json().map_err(PersistenceError::from)?;
        self.storage.write(STORAGE_KEY, &json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, PersistenceResult};

    fn seeded(storage: MemoryStore) -> Trainer<MemoryStore> {
        Trainer::load(storage, TrainerOptions { seed: Some(42) })
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn read(&self, _key: &str) -> PersistenceResult<Option<String>> {
            Err(PersistenceError::Unavailable("offline".to_string()))
        }

        fn write(&mut self, _key: &str, _value: &str) -> PersistenceResult<()> {
            Err(PersistenceError::Unavailable("offline".to_string()))
        }
    }

    #[test]
    fn test_load_restores_persisted_records() {
        let storage = MemoryStore::with_value(STORAGE_KEY, r#"{"3x7":{"correct":2,"wrong":1}}"#);
        let trainer = seeded(storage);
        assert_eq!(trainer.record(7, 3), FactRecord::new(2, 1));
        assert!(trainer.current().is_none());
        assert!(trainer.filters().is_all());
    }

    #[test]
    fn test_load_corrupt_starts_fresh() {
        let trainer = seeded(MemoryStore::with_value(STORAGE_KEY, "}{"));
        assert!(trainer.facts().is_empty());
        assert_eq!(trainer.summary().total_correct, 0);
    }

    #[test]
    fn test_load_read_failure_starts_fresh() {
        let trainer = Trainer::load(FailingStore, TrainerOptions::default());
        assert!(trainer.facts().is_empty());
    }

    #[test]
    fn test_record_answer_without_question_is_noop() {
        let mut trainer = seeded(MemoryStore::new());
        assert!(trainer.record_answer(true).unwrap().is_none());
        assert_eq!(trainer.storage().write_count(), 0);
    }

    #[test]
    fn test_record_answer_persists_every_time() {
        let mut trainer = seeded(MemoryStore::new());
        let q = trainer.next_question().unwrap();

        trainer.record_answer(true).unwrap();
        let record = trainer.record_answer(false).unwrap().unwrap();

        assert_eq!(record, FactRecord::new(1, 1));
        assert_eq!(trainer.storage().write_count(), 2);

        let persisted = trainer.storage().get(STORAGE_KEY).unwrap();
        let reloaded = FactStore::from_json(persisted).unwrap();
        assert_eq!(reloaded.get(q.a, q.b), FactRecord::new(1, 1));
    }

    #[test]
    fn test_record_outcome_rejects_bad_operands() {
        let mut trainer = seeded(MemoryStore::new());
        assert!(matches!(
            trainer.record_outcome(0, 4, true),
            Err(TrainerError::InvalidOperands { a: 0, b: 4 })
        ));
        assert!(trainer.facts().is_empty());
    }

    #[test]
    fn test_write_failure_surfaces_but_keeps_memory_state() {
        let mut trainer = Trainer::load(FailingStore, TrainerOptions { seed: Some(1) });
        trainer.next_question().unwrap();

        let result = trainer.record_answer(true);

        assert!(matches!(result, Err(TrainerError::Persistence(_))));
        assert_eq!(trainer.summary().total_correct, 1);
    }

    #[test]
    fn test_reveal_answer_once() {
        let mut trainer = seeded(MemoryStore::new());
        assert_eq!(trainer.reveal_answer(), None);

        let q = trainer.next_question().unwrap();
        assert_eq!(trainer.reveal_answer(), Some(q.product()));
        assert_eq!(trainer.reveal_answer(), None);
        assert!(trainer.current().unwrap().revealed);

        trainer.next_question();
        assert!(!trainer.current().unwrap().revealed);
    }

    #[test]
    fn test_jump_to_keeps_order_and_resets_filter() {
        let mut trainer = seeded(MemoryStore::new());
        trainer.toggle_filter(FilterTag::Factor(2));
        assert!(!trainer.filters().is_all());

        let q = trainer.jump_to(9, 4).unwrap();

        assert_eq!((q.a, q.b), (9, 4));
        assert!(trainer.filters().is_all());
        assert!(!trainer.current().unwrap().revealed);

        trainer.record_answer(false).unwrap();
        assert_eq!(trainer.record(4, 9), FactRecord::new(0, 1));
    }

    #[test]
    fn test_jump_to_rejects_out_of_range() {
        let mut trainer = seeded(MemoryStore::new());
        assert!(trainer.jump_to(11, 2).is_err());
        assert!(trainer.current().is_none());
    }

    #[test]
    fn test_toggle_filter_draws_matching_question() {
        let mut trainer = seeded(MemoryStore::new());
        for _ in 0..20 {
            trainer.toggle_filter(FilterTag::Factor(6));
            if let Some(q) = trainer.current().map(|c| c.question) {
                if !trainer.filters().is_all() {
                    assert!(q.fact().involves(6));
                }
            }
        }
    }

    #[test]
    fn test_reset_all() {
        let mut trainer = seeded(MemoryStore::new());
        trainer.record_outcome(3, 7, true).unwrap();
        trainer.record_outcome(5, 5, false).unwrap();

        let next = trainer.reset_all().unwrap();

        assert!(next.is_some());
        assert_eq!(
            trainer.summary(),
            MasterySummary {
                mastered_count: 0,
                total_facts: 55,
                total_correct: 0,
                total_wrong: 0,
            }
        );
        for fact in Fact::all() {
            assert_eq!(trainer.record(fact.lo(), fact.hi()), FactRecord::default());
        }
        assert_eq!(trainer.storage().get(STORAGE_KEY), Some("{}"));
    }

    #[test]
    fn test_weight_and_cell_state_views() {
        let mut trainer = seeded(MemoryStore::new());
        trainer.record_outcome(2, 8, false).unwrap();
        assert_eq!(trainer.weight(8, 2), 5.0);
        assert_eq!(trainer.cell_state(8, 2), CellState::Red);
        assert_eq!(trainer.weight(1, 1), 2.0);
    }
}
