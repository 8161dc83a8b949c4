//! CandidateGenerator: Apriori-style join+prune over the pattern lattice.

use hashbrown::HashMap;
use tracing::debug;

use crate::types::{Pattern, SubPatterns};

/// Generates size-(k+1) candidates from a set of size-k Patterns.
///
/// `patterns` must all be the same size (the original algorithm's `mdp`
/// parameter); an empty or singleton input simply yields an empty candidate
/// map. The output maps each candidate to the ordered pair of SubPatterns it
/// was built from.
pub fn generate_candidates(patterns: &[Pattern]) -> HashMap<Pattern, SubPatterns> {
    if let Some(first) = patterns.first() {
        debug_assert!(
            patterns.iter().all(|p| p.size() == first.size()),
            "apriori-gen requires all input patterns to share the same size"
        );
    }

    let mut sorted: Vec<&Pattern> = patterns.iter().collect();
    sorted.sort();

    let mut candidates: HashMap<Pattern, SubPatterns> = HashMap::new();

    // Join step: canonical order makes `p <= q` iteration natural, and the
    // "first k-1 elements equal, last elements ordered" test is a direct
    // comparison of the two sorted event-type slices.
    for (i, &p) in sorted.iter().enumerate() {
        for &q in &sorted[i..] {
            if p.prefix_elements() == q.prefix_elements() && p.last() < q.last() {
                let candidate = p.union(q);
                candidates.insert(
                    candidate,
                    SubPatterns {
                        left: p.clone(),
                        right: q.clone(),
                    },
                );
            }
        }
    }

    // Prune step: a size-(k+1) candidate survives only if all k+1 of its
    // size-k subsets are present in the input.
    candidates.retain(|candidate, _| {
        let required = candidate.size();
        let existing = sorted
            .iter()
            .filter(|p| p.is_strict_subset_of(candidate))
            .count();
        debug_assert!(existing <= required);
        existing == required
    });

    debug!(
        input = patterns.len(),
        candidates = candidates.len(),
        "generated candidates"
    );
    candidates
}
