//! SpatialPrevalence and TimePrevalence: the two-dimensional prevalence test.

use hashbrown::{HashMap, HashSet};
use tracing::debug;

use crate::dataset::DatasetView;
use crate::instance_table::InstanceTable;
use crate::types::{EventType, InstanceId, Pattern};

/// The append-only, per-pattern history of participation-index values, one
/// entry per processed time slot, used as evidence by ClosureFilter.
#[derive(Debug, Default, Clone)]
pub struct ParticipationIndexHistory {
    entries: HashMap<Pattern, Vec<f64>>,
}

impl ParticipationIndexHistory {
    pub fn new() -> Self {
        ParticipationIndexHistory {
            entries: HashMap::new(),
        }
    }

    pub(crate) fn record(&mut self, pattern: &Pattern, value: f64) {
        self.entries
            .entry(pattern.clone())
            .or_default()
            .push(value);
    }

    pub fn get(&self, pattern: &Pattern) -> Option<&[f64]> {
        self.entries.get(pattern).map(|v| v.as_slice())
    }
}

/// Computes the participation index of `pattern` given its InstanceTable, and
/// returns the set of Patterns that are spatial-prevalent at threshold `spt`,
/// recording one history entry per input pattern along the way.
///
/// An empty InstanceTable is given participation index 0.0, so it is never
/// prevalent and still gets a recorded history entry.
pub fn find_spatial_prevalent<D: DatasetView>(
    dataset: &D,
    tables: &HashMap<Pattern, InstanceTable>,
    spt: f64,
    history: &mut ParticipationIndexHistory,
) -> HashSet<Pattern> {
    debug_assert!(spt > 0.0 && spt <= 1.0);

    let mut spatial_prevalent = HashSet::new();

    for (pattern, table) in tables {
        let participation_index = if table.is_empty() {
            0.0
        } else {
            participation_index_of(dataset, pattern, table)
        };

        debug_assert!((0.0..=1.0).contains(&participation_index));
        if participation_index >= spt {
            spatial_prevalent.insert(pattern.clone());
        }
        history.record(pattern, participation_index);
    }

    debug!(
        prevalent = spatial_prevalent.len(),
        total = tables.len(),
        "computed spatial prevalence"
    );
    spatial_prevalent
}

fn participation_index_of<D: DatasetView>(
    dataset: &D,
    pattern: &Pattern,
    table: &InstanceTable,
) -> f64 {
    let mut ids_by_type: HashMap<EventType, HashSet<InstanceId>> = HashMap::new();
    for instance in table.all_instances() {
        ids_by_type
            .entry(instance.event_type.clone())
            .or_default()
            .insert(instance.id);
    }

    pattern
        .event_types()
        .iter()
        .map(|event_type| {
            let present = ids_by_type.get(event_type).map(|s| s.len()).unwrap_or(0) as f64;
            let total = dataset.objects_by_event_type(event_type).len() as f64;
            debug_assert!(total > 0.0, "event type in a pattern must have instances");
            present / total
        })
        .fold(f64::INFINITY, f64::min)
}

/// Incremental temporal accumulator: tracks, for each still-plausible
/// candidate, the fraction of processed time slots in which it has been
/// spatial-prevalent, pruning patterns that can no longer reach `tpt`.
#[derive(Debug)]
pub struct TimePrevalence {
    tp: HashMap<Pattern, f64>,
    time_slot_count: usize,
}

impl TimePrevalence {
    pub fn new(candidates: impl IntoIterator<Item = Pattern>, time_slot_count: usize) -> Self {
        debug_assert!(time_slot_count > 0);
        TimePrevalence {
            tp: candidates.into_iter().map(|p| (p, 0.0)).collect(),
            time_slot_count,
        }
    }

    pub fn contains(&self, pattern: &Pattern) -> bool {
        self.tp.contains_key(pattern)
    }

    pub fn is_empty(&self) -> bool {
        self.tp.is_empty()
    }

    /// Updates the running time index with this slot's spatial-prevalent set,
    /// then prunes patterns that are mathematically unable to reach `tpt`
    /// even if spatial-prevalent in every remaining slot. `slot_index` is the
    /// 0-based index of this slot within the mining window.
    ///
    /// Returns the still-plausible MDCOP set for this slot: the domain of
    /// `tp` after pruning.
    pub fn update_and_prune(
        &mut self,
        spatial_prevalent: &HashSet<Pattern>,
        slot_index: usize,
        tpt: f64,
    ) -> HashSet<Pattern> {
        debug_assert!(tpt > 0.0 && tpt <= 1.0);
        debug_assert!(slot_index < self.time_slot_count);

        let increment = 1.0 / self.time_slot_count as f64;
        for pattern in spatial_prevalent {
            if let Some(index) = self.tp.get_mut(pattern) {
                *index += increment;
            }
        }

        let remaining = (self.time_slot_count - slot_index - 1) as f64;
        let n = self.time_slot_count as f64;
        self.tp.retain(|_, &mut time_index| {
            debug_assert!((0.0..=1.0).contains(&time_index));
            time_index >= tpt || time_index + remaining / n >= tpt
        });

        debug!(
            remaining = self.tp.len(),
            slot_index, "pruned time-prevalence table"
        );
        self.tp.keys().cloned().collect()
    }
}
