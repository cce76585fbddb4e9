//! Fact Store
//!
//! Per-fact answer counters keyed by canonical [`Fact`].
//!
//! - Reads never materialise a record; an absent fact reads as zero.
//! - `record_outcome` creates the record on first use.
//! - The persisted form is a JSON object of `"<lo>x<hi>"` keys to
//!   `{"correct": n, "wrong": n}`. Loading is lenient: anything that does not
//!   parse yields an empty store.

use std::collections::BTreeMap;

use crate::sanitize::sanitize_records;
use crate::types::{Fact, FactRecord};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FactStore {
    records: BTreeMap<Fact, FactRecord>,
}

impl FactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record for `(a, b)` in either order. Out-of-range operands read as zero.
    pub fn get(&self, a: u8, b: u8) -> FactRecord {
        Fact::new(a, b)
            .map(|fact| self.get_fact(&fact))
            .unwrap_or_default()
    }

    pub fn get_fact(&self, fact: &Fact) -> FactRecord {
        self.records.get(fact).copied().unwrap_or_default()
    }

    /// Whether a record has been materialised for this fact.
    pub fn contains(&self, fact: &Fact) -> bool {
        self.records.contains_key(fact)
    }

    /// Increment `correct` or `wrong` for the fact, creating it if absent.
    ///
    /// Returns the updated record.
    pub fn record_outcome(&mut self, fact: Fact, correct: bool) -> FactRecord {
        let entry = self.records.entry(fact).or_default();
        if correct {
            entry.correct = entry.correct.saturating_add(1);
        } else {
            entry.wrong = entry.wrong.saturating_add(1);
        }
        *entry
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Number of materialised records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Fact, &FactRecord)> {
        self.records.iter()
    }

    // ==================== Persistence Format ====================

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let wire: BTreeMap<String, FactRecord> = self
            .records
            .iter()
            .map(|(fact, record)| (fact.to_string(), *record))
            .collect();
        serde_json::to_string(&wire)
    }

    /// Strict parse of the persisted form. Bad individual keys are dropped;
    /// a malformed document or wrong shape is an error.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let wire: BTreeMap<String, FactRecord> = serde_json::from_str(raw)?;
        let cleaned = sanitize_records(wire);
        if !cleaned.dropped.is_empty() {
            tracing::warn!(
                dropped = cleaned.dropped.len(),
                keys = ?cleaned.dropped,
                "ignoring non-canonical fact keys in persisted store"
            );
        }
        Ok(Self {
            records: cleaned.records,
        })
    }

    /// Lenient load used at startup: absent or unparseable input is a fresh store.
    pub fn load_from_persistent(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            tracing::debug!("no persisted fact store, starting fresh");
            return Self::new();
        };
        match Self::from_json(raw) {
            Ok(store) => {
                tracing::debug!(records = store.len(), "fact store restored");
                store
            }
            Err(err) => {
                tracing::warn!(error = %err, "persisted fact store unreadable, starting fresh");
                Self::new()
            }
        }
    }
}
