//! Data Sanitization
//!
//! Guards between raw input and the engine.
//!
//! Functions:
//! - Weight vector validation for the sampler
//! - Persisted record cleanup (non-canonical and out-of-range keys)
//! - Filter tag parsing

use std::collections::BTreeMap;

use crate::types::{is_valid_operand, Fact, FactRecord};

/// Check whether a weight slice holds NaN, infinite or negative values
pub fn has_invalid_values(arr: &[f64]) -> bool {
    arr.iter()
        .any(|&x| x.is_nan() || x.is_infinite() || x < 0.0)
}

/// Records kept after cleanup, plus the raw keys that were dropped
#[derive(Debug, Default)]
pub struct SanitizedRecords {
    pub records: BTreeMap<Fact, FactRecord>,
    pub dropped: Vec<String>,
}

/// Keep only entries whose key is a canonical in-range `"<lo>x<hi>"`.
pub fn sanitize_records(raw: BTreeMap<String, FactRecord>) -> SanitizedRecords {
    let mut out = SanitizedRecords::default();
    for (key, record) in raw {
        match key.parse::<Fact>() {
            Ok(fact) => {
                out.records.insert(fact, record);
            }
            Err(_) => out.dropped.push(key),
        }
    }
    out
}

/// Parse a factor filter value ("1" through "10").
pub fn parse_operand(value: &str) -> Option<u8> {
    let trimmed = value.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse::<u8>().ok().filter(|&v| is_valid_operand(v))
}
