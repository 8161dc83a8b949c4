//! The neighbor predicate capability the core consumes by contract.
//!
//! The core never knows about Euclidean distance or great-circle geometry; it
//! only ever calls `neighbors(a, b)`. Concrete implementations live outside
//! this crate (see `mdcop-geo`).

use crate::types::Instance;

/// A pure, deterministic "are these two instances neighbors?" predicate.
///
/// Implementations must be symmetric: `neighbors(a, b) == neighbors(b, a)`.
pub trait NeighborPredicate {
    fn neighbors(&self, a: &Instance, b: &Instance) -> bool;
}
