//! Common Types and Constants
//!
//! Shared data structures used across all engine modules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ==================== Constants ====================

/// Smallest operand in the practice domain
pub const MIN_OPERAND: u8 = 1;

/// Largest operand in the practice domain
pub const MAX_OPERAND: u8 = 10;

/// Number of distinct facts: 10 choose 2 plus 10 doubles
pub const TOTAL_FACTS: usize = 55;

/// Namespace key under which the fact store is persisted
pub const STORAGE_KEY: &str = "mathtrainer_v1";

/// Weight of a fact that has never been answered
pub const UNSEEN_WEIGHT: f64 = 2.0;

/// Weight of a fact answered wrong more often than right
pub const STRUGGLING_WEIGHT: f64 = 5.0;

/// Weight of a fact with some mistakes that is currently ahead
pub const RECOVERING_WEIGHT: f64 = 3.0;

/// Weight of a fact answered correctly many times without a mistake
pub const SETTLED_WEIGHT: f64 = 0.5;

/// Weight of a fact with a few correct answers and no mistakes
pub const LEARNING_WEIGHT: f64 = 1.0;

/// Correct answers (with zero mistakes) after which a fact is suppressed
pub const SETTLED_CORRECT_THRESHOLD: u32 = 3;

// ==================== Fact ====================

/// One multiplication fact, stored in canonical `(lo, hi)` order.
///
/// `3 × 7` and `7 × 3` are the same fact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Fact {
    lo: u8,
    hi: u8,
}

impl Fact {
    /// Build the canonical fact for two operands, `None` if either is outside 1..=10.
    pub fn new(a: u8, b: u8) -> Option<Self> {
        if !is_valid_operand(a) || !is_valid_operand(b) {
            return None;
        }
        Some(Self {
            lo: a.min(b),
            hi: a.max(b),
        })
    }

    pub fn lo(&self) -> u8 {
        self.lo
    }

    pub fn hi(&self) -> u8 {
        self.hi
    }

    pub fn product(&self) -> u32 {
        u32::from(self.lo) * u32::from(self.hi)
    }

    /// Whether `value` appears as either factor.
    pub fn involves(&self, value: u8) -> bool {
        self.lo == value || self.hi == value
    }

    /// Every fact in generation order: `a` from 1..=10, `b` from `a`..=10.
    pub fn all() -> impl Iterator<Item = Fact> {
        (MIN_OPERAND..=MAX_OPERAND)
            .flat_map(|a| (a..=MAX_OPERAND).map(move |b| Fact { lo: a, hi: b }))
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.lo, self.hi)
    }
}

/// Error returned when a string is not a `"<lo>x<hi>"` key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid fact key: {0:?}")]
pub struct ParseFactError(pub String);

impl FromStr for Fact {
    type Err = ParseFactError;

    /// Parses the persisted key form. Only canonical keys (`lo <= hi`) are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseFactError(s.to_string());
        let (lo, hi) = s.split_once('x').ok_or_else(err)?;
        let lo: u8 = lo.parse().map_err(|_| err())?;
        let hi: u8 = hi.parse().map_err(|_| err())?;
        let fact = Fact::new(lo, hi).ok_or_else(err)?;
        // rejects "9x4", "04x9" and "+4x9"
        if fact.to_string() != s {
            return Err(err());
        }
        Ok(fact)
    }
}

/// Canonical storage key for a pair of operands, in either order.
pub fn stat_key(a: u8, b: u8) -> String {
    format!("{}x{}", a.min(b), a.max(b))
}

pub fn is_valid_operand(value: u8) -> bool {
    (MIN_OPERAND..=MAX_OPERAND).contains(&value)
}

// ==================== Records ====================

/// Answer history for one fact
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactRecord {
    /// Times answered correctly
    pub correct: u32,
    /// Times answered wrong
    pub wrong: u32,
}

impl FactRecord {
    pub fn new(correct: u32, wrong: u32) -> Self {
        Self { correct, wrong }
    }

    pub fn is_unseen(&self) -> bool {
        self.correct == 0 && self.wrong == 0
    }

    pub fn attempts(&self) -> u64 {
        u64::from(self.correct) + u64::from(self.wrong)
    }
}

/// Display bucket of a matrix cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    /// Never answered
    Never,
    /// More wrong than right
    Red,
    /// As many wrong as right
    Orange,
    /// More right than wrong
    Green,
}

impl CellState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CellState::Never => "never",
            CellState::Red => "red",
            CellState::Orange => "orange",
            CellState::Green => "green",
        }
    }
}

// ==================== Questions ====================

/// A question as displayed, operands in the order they are shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Question {
    pub a: u8,
    pub b: u8,
}

impl Question {
    pub fn new(a: u8, b: u8) -> Option<Self> {
        Fact::new(a, b).map(|_| Self { a, b })
    }

    pub fn fact(&self) -> Fact {
        Fact {
            lo: self.a.min(self.b),
            hi: self.a.max(self.b),
        }
    }

    pub fn product(&self) -> u32 {
        u32::from(self.a) * u32::from(self.b)
    }
}

impl From<Fact> for Question {
    fn from(fact: Fact) -> Self {
        Self {
            a: fact.lo,
            b: fact.hi,
        }
    }
}

/// The question in progress and whether its answer has been shown
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CurrentQuestion {
    pub question: Question,
    pub revealed: bool,
}

// ==================== Derived Views ====================

/// Aggregate progress over all 55 facts
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterySummary {
    pub mastered_count: usize,
    pub total_facts: usize,
    pub total_correct: u64,
    pub total_wrong: u64,
}

/// One cell of the 10x10 mastery matrix
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixCell {
    pub row: u8,
    pub col: u8,
    pub product: u32,
    pub record: FactRecord,
    pub state: CellState,
}
