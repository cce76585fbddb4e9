//! Factor Filter
//!
//! Restricts the question pool to facts involving chosen factors. The set is
//! never empty and `All` never coexists with a specific factor.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::sanitize::parse_operand;
use crate::types::{Fact, MAX_OPERAND, MIN_OPERAND};

/// One selectable tag
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterTag {
    All,
    Factor(u8),
}

impl FilterTag {
    /// `All` followed by every factor, in pill order.
    pub fn every() -> impl Iterator<Item = FilterTag> {
        std::iter::once(FilterTag::All).chain((MIN_OPERAND..=MAX_OPERAND).map(FilterTag::Factor))
    }
}

impl fmt::Display for FilterTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterTag::All => f.write_str("all"),
            FilterTag::Factor(v) => write!(f, "{v}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter value: {0:?}")]
pub struct ParseFilterError(pub String);

impl FromStr for FilterTag {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(FilterTag::All);
        }
        parse_operand(s)
            .map(FilterTag::Factor)
            .ok_or_else(|| ParseFilterError(s.to_string()))
    }
}

impl Serialize for FilterTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FilterSet {
    tags: BTreeSet<FilterTag>,
}

impl Default for FilterSet {
    fn default() -> Self {
        Self::all()
    }
}

impl FilterSet {
    pub fn all() -> Self {
        Self {
            tags: BTreeSet::from([FilterTag::All]),
        }
    }

    pub fn contains(&self, tag: FilterTag) -> bool {
        self.tags.contains(&tag)
    }

    pub fn is_all(&self) -> bool {
        self.contains(FilterTag::All)
    }

    pub fn tags(&self) -> impl Iterator<Item = FilterTag> + '_ {
        self.tags.iter().copied()
    }

    /// Toggle a tag.
    ///
    /// `All` always resets to `{All}`. A factor removes `All`, then flips its
    /// own membership; removing the last factor falls back to `{All}`.
    pub fn toggle(&mut self, tag: FilterTag) {
        match tag {
            FilterTag::All => self.reset(),
            FilterTag::Factor(_) => {
                self.tags.remove(&FilterTag::All);
                if !self.tags.remove(&tag) {
                    self.tags.insert(tag);
                }
                if self.tags.is_empty() {
                    self.tags.insert(FilterTag::All);
                }
            }
        }
    }

    pub fn reset(&mut self) {
        self.tags.clear();
        self.tags.insert(FilterTag::All);
    }

    /// Whether a generated fact is in the pool.
    pub fn matches(&self, fact: &Fact) -> bool {
        if self.is_all() {
            return true;
        }
        self.tags.iter().any(|tag| match tag {
            FilterTag::Factor(v) => fact.involves(*v),
            FilterTag::All => true,
        })
    }
}
