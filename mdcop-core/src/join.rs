//! TableJoin: joins two size-k InstanceTables that share a common prefix
//! structure into the InstanceTable of their size-(k+1) union pattern.

use tracing::trace;

use crate::instance_table::{extend_prefix, InstanceTable};
use crate::neighbor::NeighborPredicate;

/// Joins `left` and `right`, the InstanceTables of the two SubPatterns of a
/// candidate, into the InstanceTable of the candidate pattern.
///
/// Only prefix keys present in *both* tables can contribute rows; prefixes
/// found in only one side are skipped without scanning the other side, which
/// is why InstanceTable keys its rows by prefix rather than storing a flat
/// list of complete rows.
pub fn join_tables(
    left: &InstanceTable,
    right: &InstanceTable,
    predicate: &dyn NeighborPredicate,
) -> InstanceTable {
    let mut result = InstanceTable::new();

    // Iterate the smaller side's prefixes and probe the larger side by hash
    // lookup, so the join cost is proportional to the smaller table rather
    // than the product of both.
    let (probe, other, probe_is_left) = if left.row_count() <= right.row_count() {
        (left, right, true)
    } else {
        (right, left, false)
    };

    for (prefix, probe_lasts) in probe.iter() {
        let Some(other_lasts) = other.get(prefix) else {
            continue;
        };

        for probe_last in probe_lasts {
            for other_last in other_lasts {
                let (a, b) = if probe_is_left {
                    (probe_last, other_last)
                } else {
                    (other_last, probe_last)
                };

                debug_assert_ne!(
                    a.event_type, b.event_type,
                    "TableJoin must never pair two instances of the same event type"
                );

                if predicate.neighbors(a, b) {
                    let new_prefix = extend_prefix(prefix, a);
                    result.insert(new_prefix, b.clone());
                }
            }
        }
    }

    trace!(rows = result.row_count(), "joined instance table");
    result
}
