//! InstanceTable: the `prefix -> set(last)` representation of a pattern's row
//! instances in a single time slot.

use hashbrown::{HashMap, HashSet};

use crate::types::InstanceRef;

/// A prefix is a set of k-1 Instances, one per EventType, stored sorted by
/// event type so it can serve directly as a hash/ordered map key.
pub type Prefix = Vec<InstanceRef>;

/// Inserts `instance` into `prefix`, keeping the prefix sorted by event type.
/// Every instance in a prefix has a distinct event type, so this is a plain
/// sorted insert, not a merge.
pub fn extend_prefix(prefix: &Prefix, instance: &InstanceRef) -> Prefix {
    let mut extended = prefix.clone();
    let pos = extended
        .binary_search_by(|existing| existing.as_ref().cmp(instance.as_ref()))
        .unwrap_or_else(|pos| pos);
    extended.insert(pos, instance.clone());
    extended
}

/// The set of row instances of one Pattern in one time slot, keyed by prefix.
#[derive(Debug, Default, Clone)]
pub struct InstanceTable {
    rows: HashMap<Prefix, HashSet<InstanceRef>>,
}

impl InstanceTable {
    pub fn new() -> Self {
        InstanceTable {
            rows: HashMap::new(),
        }
    }

    /// Builds the InstanceTable for a singleton Pattern: the empty prefix
    /// mapping to every Instance of that event type living in this time slot.
    pub fn singleton(instances: impl IntoIterator<Item = InstanceRef>) -> Self {
        let mut table = InstanceTable::new();
        let set: HashSet<InstanceRef> = instances.into_iter().collect();
        if !set.is_empty() {
            table.rows.insert(Vec::new(), set);
        }
        table
    }

    pub fn insert(&mut self, prefix: Prefix, last: InstanceRef) {
        self.rows.entry(prefix).or_default().insert(last);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.values().map(|s| s.len()).sum()
    }

    pub fn get(&self, prefix: &Prefix) -> Option<&HashSet<InstanceRef>> {
        self.rows.get(prefix)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Prefix, &HashSet<InstanceRef>)> {
        self.rows.iter()
    }

    /// All distinct instances that appear anywhere in this table, across both
    /// the prefix positions and the last position. Used by SpatialPrevalence
    /// to compute participation ratios.
    pub fn all_instances(&self) -> impl Iterator<Item = &InstanceRef> {
        self.rows
            .iter()
            .flat_map(|(prefix, lasts)| prefix.iter().chain(lasts.iter()))
    }
}
