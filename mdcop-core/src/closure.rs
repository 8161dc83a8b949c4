//! ClosureFilter: drops size-k patterns fully explained by a size-(k+1)
//! superset's identical participation-index history.

use hashbrown::HashSet;
use tracing::debug;

use crate::prevalence::ParticipationIndexHistory;
use crate::types::Pattern;

/// Removes from `mdp_k` every Pattern that has a strict superset in
/// `mdp_k_plus_1` with an exactly equal participation-index history.
///
/// Callers skip this for `k < 2`: size-1 patterns are never part of the
/// reported output regardless of closure.
pub fn filter_closed(
    mdp_k: &HashSet<Pattern>,
    mdp_k_plus_1: &HashSet<Pattern>,
    history: &ParticipationIndexHistory,
) -> HashSet<Pattern> {
    let closed: HashSet<Pattern> = mdp_k
        .iter()
        .filter(|p| !has_explaining_superset(p, mdp_k_plus_1, history))
        .cloned()
        .collect();

    debug!(
        before = mdp_k.len(),
        after = closed.len(),
        "applied closure filter"
    );
    closed
}

fn has_explaining_superset(
    p: &Pattern,
    candidates: &HashSet<Pattern>,
    history: &ParticipationIndexHistory,
) -> bool {
    let Some(p_history) = history.get(p) else {
        return false;
    };

    candidates.iter().any(|q| {
        p.is_strict_subset_of(q)
            && history.get(q).map(|q_history| q_history == p_history).unwrap_or(false)
    })
}
