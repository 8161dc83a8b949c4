//! Miner: the level-wise driver tying CandidateGenerator, TableJoin,
//! SpatialPrevalence, TimePrevalence, and ClosureFilter together.

use hashbrown::{HashMap, HashSet};
use tracing::{debug_span, info, info_span};

use crate::candidate::generate_candidates;
use crate::closure::filter_closed;
use crate::dataset::DatasetView;
use crate::error::{MdcopError, Result};
use crate::instance_table::InstanceTable;
use crate::join::join_tables;
use crate::neighbor::NeighborPredicate;
use crate::prevalence::{find_spatial_prevalent, ParticipationIndexHistory, TimePrevalence};
use crate::types::{Pattern, TimeSlot};

/// A mining run's tunable thresholds, validated once up front.
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    pub spatial_prevalence: f64,
    pub time_prevalence: f64,
}

impl Thresholds {
    pub fn new(spatial_prevalence: f64, time_prevalence: f64) -> Result<Self> {
        if !(0.0 < spatial_prevalence && spatial_prevalence <= 1.0) {
            return Err(MdcopError::InvalidThreshold {
                name: "spt",
                value: spatial_prevalence,
            });
        }
        if !(0.0 < time_prevalence && time_prevalence <= 1.0) {
            return Err(MdcopError::InvalidThreshold {
                name: "tpt",
                value: time_prevalence,
            });
        }
        Ok(Thresholds {
            spatial_prevalence,
            time_prevalence,
        })
    }
}

/// An inclusive-start, count-based time-slot window into a dataset.
#[derive(Debug, Clone, Copy)]
pub struct TimeWindow {
    pub first: usize,
    pub count: usize,
}

impl TimeWindow {
    pub fn new(first: i64, count: i64, available: usize) -> Result<Self> {
        if first < 0 || count <= 0 || (first as i64 + count as i64) > available as i64 {
            return Err(MdcopError::InvalidWindow {
                first,
                count,
                available,
            });
        }
        Ok(TimeWindow {
            first: first as usize,
            count: count as usize,
        })
    }

    fn slots(&self) -> impl Iterator<Item = usize> {
        self.first..(self.first + self.count)
    }
}

/// Whether TimePrevalence's early-pruning optimization runs.
///
/// Disabling it exists solely to support the early-prune-safety testable
/// property: the final MDCOP set must be identical either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EarlyPrune {
    Enabled,
    Disabled,
}

/// The top-level mining driver. Runs the level-wise loop to
/// completion and returns the closed MDCOP set for every reported size.
pub struct Miner<'a> {
    dataset: &'a dyn DatasetView,
    predicate: &'a dyn NeighborPredicate,
    window: TimeWindow,
    thresholds: Thresholds,
    early_prune: EarlyPrune,
}

impl<'a> Miner<'a> {
    pub fn new(
        dataset: &'a dyn DatasetView,
        predicate: &'a dyn NeighborPredicate,
        window: TimeWindow,
        thresholds: Thresholds,
    ) -> Self {
        Miner {
            dataset,
            predicate,
            window,
            thresholds,
            early_prune: EarlyPrune::Enabled,
        }
    }

    pub fn with_early_prune(mut self, early_prune: EarlyPrune) -> Self {
        self.early_prune = early_prune;
        self
    }

    /// Runs the full mining loop and returns `size -> closed MDCOP set` for
    /// every reported size (2 and up).
    pub fn mine(&self) -> Result<HashMap<usize, HashSet<Pattern>>> {
        if self.dataset.event_types().is_empty() || self.dataset.time_slot_count() == 0 {
            return Err(MdcopError::EmptyDataset);
        }

        let mut history = ParticipationIndexHistory::new();

        let mut cmdp: HashSet<Pattern> = self
            .dataset
            .event_types()
            .iter()
            .map(|e| Pattern::singleton(e.clone()))
            .collect();

        let mut tables: HashMap<usize, HashMap<Pattern, InstanceTable>> = HashMap::new();
        for slot in self.window.slots() {
            let mut level_tables = HashMap::new();
            for event_type in self.dataset.event_types() {
                let pattern = Pattern::singleton(event_type.clone());
                let instances: Vec<_> = self
                    .dataset
                    .objects_by_time_slot(TimeSlot(slot as u32))
                    .iter()
                    .filter(|i| i.event_type == *event_type)
                    .cloned()
                    .collect();
                level_tables.insert(pattern, InstanceTable::singleton(instances));
            }
            tables.insert(slot, level_tables);
        }

        let mut output: HashMap<usize, HashSet<Pattern>> = HashMap::new();
        let mut k = 1;

        loop {
            if cmdp.is_empty() {
                break;
            }

            let level_span = info_span!("mining_level", k = k + 1);
            let _enter = level_span.enter();

            let level_patterns: Vec<Pattern> = cmdp.iter().cloned().collect();
            let candidate_map = generate_candidates(&level_patterns);

            if candidate_map.is_empty() {
                break;
            }

            let mut candidates_by_slot: HashMap<usize, HashSet<Pattern>> = self
                .window
                .slots()
                .map(|s| (s, candidate_map.keys().cloned().collect()))
                .collect();

            let mut time_prevalence = TimePrevalence::new(
                candidate_map.keys().cloned(),
                self.window.count,
            );

            let mut next_tables: HashMap<usize, HashMap<Pattern, InstanceTable>> = HashMap::new();
            let mut next_level = HashSet::new();

            for (slot_index, slot) in self.window.slots().enumerate() {
                let slot_span = debug_span!("time_slot", slot);
                let _slot_enter = slot_span.enter();

                let slot_candidates = candidates_by_slot
                    .remove(&slot)
                    .unwrap_or_default();
                let slot_tables = tables.remove(&slot).unwrap_or_default();

                // Every slot-surviving candidate gets an entry, even a join
                // that produces no rows, so SpatialPrevalence records a
                // history value (and its 0.0 sentinel) for it.
                let empty = InstanceTable::new();
                let mut new_tables: HashMap<Pattern, InstanceTable> = HashMap::new();
                for (candidate, sub) in &candidate_map {
                    if !slot_candidates.contains(candidate) {
                        continue;
                    }
                    let left = slot_tables.get(&sub.left).unwrap_or(&empty);
                    let right = slot_tables.get(&sub.right).unwrap_or(&empty);
                    new_tables.insert(candidate.clone(), join_tables(left, right, self.predicate));
                }

                let spatial_prevalent = find_spatial_prevalent(
                    self.dataset,
                    &new_tables,
                    self.thresholds.spatial_prevalence,
                    &mut history,
                );

                new_tables.retain(|pattern, _| spatial_prevalent.contains(pattern));

                let still_plausible = time_prevalence.update_and_prune(
                    &spatial_prevalent,
                    slot_index,
                    self.thresholds.time_prevalence,
                );

                if self.early_prune == EarlyPrune::Enabled {
                    new_tables.retain(|pattern, _| still_plausible.contains(pattern));
                }

                next_level = still_plausible;

                if let Some(next_candidates) = candidates_by_slot.get_mut(&(slot + 1)) {
                    if self.early_prune == EarlyPrune::Enabled {
                        next_candidates.retain(|p| next_level.contains(p));
                    }
                }

                next_tables.insert(slot, new_tables);
            }

            tables = next_tables;

            info!(k = k + 1, survivors = next_level.len(), "level complete");

            if !next_level.is_empty() {
                output.insert(k + 1, next_level.clone());
            }

            // MDCOP_k is still `cmdp` here; it is only reassigned below, once
            // the closure comparison against MDCOP_{k+1} has been made.
            if k >= 2 {
                let closed_previous = filter_closed(&cmdp, &next_level, &history);
                if closed_previous.is_empty() {
                    output.remove(&k);
                } else {
                    output.insert(k, closed_previous);
                }
            }

            cmdp = next_level;
            k += 1;
        }

        output.retain(|&size, patterns| size >= 2 && !patterns.is_empty());
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EventType, Instance, InstanceId};
    use proptest::prelude::*;
    use std::sync::Arc;

    struct FixedDataset {
        event_types: HashSet<EventType>,
        by_type: HashMap<EventType, Vec<Arc<Instance>>>,
        by_slot: HashMap<u32, Vec<Arc<Instance>>>,
        time_slot_count: usize,
    }

    impl DatasetView for FixedDataset {
        fn event_types(&self) -> &HashSet<EventType> {
            &self.event_types
        }

        fn objects_by_event_type(&self, event_type: &EventType) -> &[Arc<Instance>] {
            self.by_type
                .get(event_type)
                .map(|v| v.as_slice())
                .unwrap_or(&[])
        }

        fn objects_by_time_slot(&self, time_slot: TimeSlot) -> &[Arc<Instance>] {
            self.by_slot
                .get(&time_slot.0)
                .map(|v| v.as_slice())
                .unwrap_or(&[])
        }

        fn time_slot_count(&self) -> usize {
            self.time_slot_count
        }
    }

    struct WithinDistance(f64);

    impl NeighborPredicate for WithinDistance {
        fn neighbors(&self, a: &Instance, b: &Instance) -> bool {
            let dx = a.x - b.x;
            let dy = a.y - b.y;
            (dx * dx + dy * dy) <= self.0 * self.0
        }
    }

    /// Only `a1`/`b1` are within neighbor distance of each other; `a2`/`b2`
    /// sit far from everything else, so the single {A,B} row uses exactly
    /// one A id and one B id out of two each, giving participation index
    /// min(1/2, 1/2) = 0.5 rather than the 1.0 a fully co-located 2x2 would
    /// produce.
    fn build_two_type_dataset() -> FixedDataset {
        let a1 = Arc::new(Instance::new(EventType::from("A"), InstanceId(0), 0.0, 0.0, TimeSlot(0)));
        let a2 = Arc::new(Instance::new(EventType::from("A"), InstanceId(1), 50.0, 50.0, TimeSlot(0)));
        let b1 = Arc::new(Instance::new(EventType::from("B"), InstanceId(0), 0.0, 0.0, TimeSlot(0)));
        let b2 = Arc::new(Instance::new(EventType::from("B"), InstanceId(1), 99.0, 99.0, TimeSlot(0)));

        let mut event_types = HashSet::new();
        event_types.insert(EventType::from("A"));
        event_types.insert(EventType::from("B"));

        let mut by_type = HashMap::new();
        by_type.insert(EventType::from("A"), vec![a1.clone(), a2.clone()]);
        by_type.insert(EventType::from("B"), vec![b1.clone(), b2.clone()]);

        let mut by_slot = HashMap::new();
        by_slot.insert(0, vec![a1, a2, b1, b2]);

        FixedDataset {
            event_types,
            by_type,
            by_slot,
            time_slot_count: 1,
        }
    }

    /// participation index 0.5 with spt=0.5, tpt=1.0 yields {2: {{A,B}}}.
    #[test]
    fn e2e_1_finds_the_single_pair() {
        let dataset = build_two_type_dataset();
        let predicate = WithinDistance(1.0);
        let window = TimeWindow::new(0, 1, dataset.time_slot_count()).unwrap();
        let thresholds = Thresholds::new(0.5, 1.0).unwrap();

        let miner = Miner::new(&dataset, &predicate, window, thresholds);
        let result = miner.mine().unwrap();

        assert_eq!(result.len(), 1);
        let ab = Pattern::from_event_types([EventType::from("A"), EventType::from("B")]);
        assert!(result.get(&2).unwrap().contains(&ab));
    }

    /// Same dataset with spt=0.6 exceeds the 0.5 participation index -> nothing reported.
    #[test]
    fn e2e_2_spt_too_high_finds_nothing() {
        let dataset = build_two_type_dataset();
        let predicate = WithinDistance(1.0);
        let window = TimeWindow::new(0, 1, dataset.time_slot_count()).unwrap();
        let thresholds = Thresholds::new(0.6, 1.0).unwrap();

        let miner = Miner::new(&dataset, &predicate, window, thresholds);
        let result = miner.mine().unwrap();
        assert!(result.values().all(|s| s.is_empty()) || result.is_empty());
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let dataset = FixedDataset {
            event_types: HashSet::new(),
            by_type: HashMap::new(),
            by_slot: HashMap::new(),
            time_slot_count: 0,
        };
        let predicate = WithinDistance(1.0);
        let err = TimeWindow::new(0, 1, dataset.time_slot_count());
        assert!(err.is_err());
    }

    #[test]
    fn early_prune_toggle_yields_same_result() {
        let dataset = build_two_type_dataset();
        let predicate = WithinDistance(1.0);
        let window = TimeWindow::new(0, 1, dataset.time_slot_count()).unwrap();
        let thresholds = Thresholds::new(0.5, 1.0).unwrap();

        let with_prune = Miner::new(&dataset, &predicate, window, thresholds).mine().unwrap();
        let without_prune = Miner::new(&dataset, &predicate, window, thresholds)
            .with_early_prune(EarlyPrune::Disabled)
            .mine()
            .unwrap();

        assert_eq!(with_prune, without_prune);
    }

    fn build_random_dataset(
        a: &[(f64, f64, u32)],
        b: &[(f64, f64, u32)],
        c: &[(f64, f64, u32)],
    ) -> FixedDataset {
        let mut event_types = HashSet::new();
        let mut by_type = HashMap::new();
        let mut by_slot: HashMap<u32, Vec<Arc<Instance>>> = HashMap::new();

        for (label, points) in [("A", a), ("B", b), ("C", c)] {
            if points.is_empty() {
                continue;
            }
            let event_type = EventType::from(label);
            event_types.insert(event_type.clone());
            let mut instances = Vec::new();
            for (i, &(x, y, slot)) in points.iter().enumerate() {
                let instance = Arc::new(Instance::new(
                    event_type.clone(),
                    InstanceId(i as u32),
                    x,
                    y,
                    TimeSlot(slot),
                ));
                by_slot.entry(slot).or_default().push(instance.clone());
                instances.push(instance);
            }
            by_type.insert(event_type, instances);
        }

        FixedDataset {
            event_types,
            by_type,
            by_slot,
            time_slot_count: 2,
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Disabling the TimePrevalence early-pruning optimization must never
        /// change the final MDCOP output, across randomly generated small
        /// datasets, distance thresholds, and prevalence thresholds.
        #[test]
        fn early_prune_toggle_matches_across_random_datasets(
            a in prop::collection::vec((0.0f64..5.0, 0.0f64..5.0, 0u32..2), 0..4),
            b in prop::collection::vec((0.0f64..5.0, 0.0f64..5.0, 0u32..2), 0..4),
            c in prop::collection::vec((0.0f64..5.0, 0.0f64..5.0, 0u32..2), 0..4),
            dt in 0.5f64..3.0,
            spt in 0.1f64..1.0,
            tpt in 0.1f64..1.0,
        ) {
            let dataset = build_random_dataset(&a, &b, &c);
            if dataset.event_types.is_empty() {
                return Ok(());
            }

            let predicate = WithinDistance(dt);
            let window = TimeWindow::new(0, dataset.time_slot_count as i64, dataset.time_slot_count).unwrap();
            let thresholds = Thresholds::new(spt, tpt).unwrap();

            let with_prune = Miner::new(&dataset, &predicate, window, thresholds).mine().unwrap();
            let without_prune = Miner::new(&dataset, &predicate, window, thresholds)
                .with_early_prune(EarlyPrune::Disabled)
                .mine()
                .unwrap();

            prop_assert_eq!(with_prune, without_prune);
        }
    }
}
