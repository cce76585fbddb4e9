//! Weighted Question Selection
//!
//! Draws the next fact from the filtered pool with probability proportional to
//! its mastery weight. The draw is a linear cumulative walk: with at most 55
//! candidates nothing fancier pays for itself.

use rand::Rng;

use crate::filter::FilterSet;
use crate::mastery::weight;
use crate::sanitize::has_invalid_values;
use crate::store::FactStore;
use crate::types::Fact;

/// Facts eligible under `filters`, in generation order.
pub fn candidate_pool(filters: &FilterSet) -> Vec<Fact> {
    Fact::all().filter(|fact| filters.matches(fact)).collect()
}

/// Pick an index given per-candidate weights and a draw in `[0, total)`.
///
/// Returns the first index whose cumulative weight exceeds `draw`; the last
/// index when rounding exhausts the walk; `None` for an empty slice.
pub fn weighted_index(weights: &[f64], draw: f64) -> Option<usize> {
    let last = weights.len().checked_sub(1)?;
    let mut cumulative = 0.0;
    for (i, w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > draw {
            return Some(i);
        }
    }
    Some(last)
}

/// Draw one fact, or `None` when the filter leaves no candidates.
pub fn select_question<R: Rng + ?Sized>(
    filters: &FilterSet,
    store: &FactStore,
    rng: &mut R,
) -> Option<Fact> {
    let pool = candidate_pool(filters);
    if pool.is_empty() {
        return None;
    }

    let weights: Vec<f64> = pool.iter().map(|f| weight(&store.get_fact(f))).collect();
    debug_assert!(!has_invalid_values(&weights), "weights must be finite and non-negative");
    let total: f64 = weights.iter().sum();

    let draw = rng.gen::<f64>() * total;
    weighted_index(&weights, draw).map(|i| pool[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterTag;
    use crate::types::TOTAL_FACTS;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashMap;

    fn fact(a: u8, b: u8) -> Fact {
        Fact::new(a, b).unwrap()
    }

    // ==================== candidate_pool ====================

    #[test]
    fn test_pool_all() {
        assert_eq!(candidate_pool(&FilterSet::all()).len(), TOTAL_FACTS);
    }

    #[test]
    fn test_pool_single_factor() {
        let mut filters = FilterSet::all();
        filters.toggle(FilterTag::Factor(3));
        let pool = candidate_pool(&filters);
        // 3 pairs with each of 1..=10 exactly once
        assert_eq!(pool.len(), 10);
        assert!(pool.iter().all(|f| f.involves(3)));
        assert!(pool.contains(&fact(3, 7)));
        assert!(pool.contains(&fact(1, 3)));
    }

    #[test]
    fn test_pool_two_factors_share_one_fact() {
        let mut filters = FilterSet::all();
        filters.toggle(FilterTag::Factor(2));
        filters.toggle(FilterTag::Factor(5));
        // 10 + 10 minus the shared 2x5
        assert_eq!(candidate_pool(&filters).len(), 19);
    }

    // ==================== weighted_index ====================

    #[test]
    fn test_weighted_index_walk() {
        let weights = [2.0, 5.0, 0.5];
        assert_eq!(weighted_index(&weights, 0.0), Some(0));
        assert_eq!(weighted_index(&weights, 1.999), Some(0));
        assert_eq!(weighted_index(&weights, 2.0), Some(1));
        assert_eq!(weighted_index(&weights, 6.99), Some(1));
        assert_eq!(weighted_index(&weights, 7.0), Some(2));
    }

    #[test]
    fn test_weighted_index_falls_back_to_last() {
        assert_eq!(weighted_index(&[1.0, 1.0], 2.0), Some(1));
        assert_eq!(weighted_index(&[1.0, 1.0], 5.0), Some(1));
    }

    #[test]
    fn test_weighted_index_empty() {
        assert_eq!(weighted_index(&[], 0.0), None);
    }

    #[test]
    fn test_pool_weights_always_positive_and_finite() {
        let mut store = FactStore::new();
        store.record_outcome(fact(2, 3), false);
        store.record_outcome(fact(4, 4), true);
        store.record_outcome(fact(4, 4), false);
        for _ in 0..5 {
            store.record_outcome(fact(6, 9), true);
        }

        let weights: Vec<f64> = candidate_pool(&FilterSet::all())
            .iter()
            .map(|f| weight(&store.get_fact(f)))
            .collect();
        assert!(!has_invalid_values(&weights));
        assert!(weights.iter().all(|&w| w > 0.0));
    }

    // ==================== select_question ====================

    #[test]
    fn test_select_respects_filter() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let store = FactStore::new();
        let mut filters = FilterSet::all();
        filters.toggle(FilterTag::Factor(9));

        for _ in 0..500 {
            let picked = select_question(&filters, &store, &mut rng).unwrap();
            assert!(picked.involves(9), "{picked} does not involve 9");
        }
    }

    #[test]
    fn test_select_is_reproducible_with_seed() {
        let store = FactStore::new();
        let filters = FilterSet::all();
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..50 {
            assert_eq!(
                select_question(&filters, &store, &mut a),
                select_question(&filters, &store, &mut b)
            );
        }
    }

    #[test]
    fn test_struggling_fact_frequency_converges() {
        let mut store = FactStore::new();
        store.record_outcome(fact(6, 8), false);

        let filters = FilterSet::all();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let runs = 100_000;
        let mut hits = 0usize;
        for _ in 0..runs {
            if select_question(&filters, &store, &mut rng) == Some(fact(6, 8)) {
                hits += 1;
            }
        }

        let expected = 5.0 / (5.0 + 54.0 * 2.0);
        let observed = hits as f64 / runs as f64;
        assert!(
            (observed - expected).abs() < 0.005,
            "observed {observed:.4}, expected {expected:.4}"
        );
    }

    #[test]
    fn test_settled_facts_are_suppressed() {
        let mut store = FactStore::new();
        for f in Fact::all() {
            for _ in 0..3 {
                store.record_outcome(f, true);
            }
        }
        store.record_outcome(fact(7, 8), false);
        store.record_outcome(fact(7, 8), false);
        store.record_outcome(fact(7, 8), false);
        store.record_outcome(fact(7, 8), false);

        let filters = FilterSet::all();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut counts: HashMap<Fact, usize> = HashMap::new();
        for _ in 0..20_000 {
            let f = select_question(&filters, &store, &mut rng).unwrap();
            *counts.entry(f).or_default() += 1;
        }

        // 7x8 weight 5.0 against 54 facts at 0.5
        let struggling = counts[&fact(7, 8)] as f64 / 20_000.0;
        let expected = 5.0 / (5.0 + 54.0 * 0.5);
        assert!((struggling - expected).abs() < 0.02, "got {struggling:.4}");
    }
}
