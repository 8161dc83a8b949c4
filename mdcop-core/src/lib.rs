//! # mdcop-core
//!
//! Mining engine for **Closed Mixed-Drove Spatiotemporal Co-occurrence
//! Patterns (Closed MDCOPs)**: given a dataset of geolocated, timestamped,
//! typed event instances, find every co-occurrence pattern that is both
//! spatial-prevalent in a sufficient fraction of time slots and closed (no
//! strict superset pattern shares its exact participation-index history).
//!
//! ## Architecture
//!
//! ```text
//! MDCOP_k -> CandidateGenerator -> candidates_{k+1}
//!   for each time slot:
//!     InstanceTable_k x candidates -> TableJoin -> InstanceTable_{k+1}
//!       -> SpatialPrevalence -> SP_{k+1}
//!   TimePrevalence accumulates SP across slots -> MDCOP_{k+1}
//!   ClosureFilter prunes MDCOP_k
//! ```
//!
//! This crate knows nothing about distance functions or dataset file
//! formats: callers supply a [`dataset::DatasetView`] and a
//! [`neighbor::NeighborPredicate`] (see the `mdcop-geo` crate for concrete
//! distance predicates, and `mdcop-cli` for a text-file dataset loader).

pub mod candidate;
pub mod closure;
pub mod dataset;
pub mod error;
pub mod instance_table;
pub mod join;
pub mod miner;
pub mod neighbor;
pub mod prevalence;
pub mod types;

pub use dataset::DatasetView;
pub use error::{MdcopError, Result};
pub use miner::{EarlyPrune, Miner, Thresholds, TimeWindow};
pub use neighbor::NeighborPredicate;
pub use types::{EventType, Instance, InstanceId, InstanceRef, InvalidDomainValue, Pattern, TimeSlot};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_surface_is_reachable() {
        let _ = EventType::new("A");
        let _ = Thresholds::new(0.5, 0.5);
    }
}
