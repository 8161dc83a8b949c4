//! The Dataset view the core consumes by contract.
//!
//! Parsing a dataset file into this shape is an external concern (see the
//! `mdcop-cli` crate's `dataset` module); the core only ever reads through
//! this trait.

use hashbrown::HashSet;

use crate::types::{EventType, InstanceRef, TimeSlot};

/// Indexed, read-only view over a parsed dataset.
pub trait DatasetView {
    /// All distinct event types present in the dataset.
    fn event_types(&self) -> &HashSet<EventType>;

    /// All instances of a given event type, across all time slots.
    fn objects_by_event_type(&self, event_type: &EventType) -> &[InstanceRef];

    /// All instances living in a given time slot, across all event types.
    fn objects_by_time_slot(&self, time_slot: TimeSlot) -> &[InstanceRef];

    /// The number of distinct time slots present in the dataset.
    fn time_slot_count(&self) -> usize;
}
