//! Core domain types: EventType, InstanceId, TimeSlot, Instance, and Pattern.
//!
//! These are validated newtypes that make a few invalid states unrepresentable:
//! an EventType can never be empty, and a Pattern can never contain a duplicate
//! EventType or be constructed out of canonical order.

use std::fmt;
use std::sync::Arc;

/// Errors raised when constructing a validated domain type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidDomainValue {
    /// An event type label was empty.
    EmptyEventType,
}

impl fmt::Display for InvalidDomainValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidDomainValue::EmptyEventType => write!(f, "event type cannot be empty"),
        }
    }
}

impl std::error::Error for InvalidDomainValue {}

/// An opaque, totally ordered event-type label (e.g. `"A"`, `"zebra"`, `"hawk"`).
///
/// Cheaply cloneable: the label is stored behind an `Arc<str>` since the same
/// handful of event types are referenced by every Instance and every Pattern.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventType(Arc<str>);

impl EventType {
    /// Creates an EventType from a non-empty label.
    pub fn new(label: impl Into<String>) -> Result<Self, InvalidDomainValue> {
        let label = label.into();
        if label.is_empty() {
            return Err(InvalidDomainValue::EmptyEventType);
        }
        Ok(EventType(Arc::from(label)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EventType {
    /// Infallible conversion for call sites that already know the label is non-empty
    /// (literal event types in tests, or labels already validated by the parser).
    fn from(label: &str) -> Self {
        EventType::new(label).expect("event type label must be non-empty")
    }
}

/// Identifier unique within a single EventType, assigned consecutively from 0
/// in the order instances of that type are encountered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstanceId(pub u32);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A non-negative discrete time slot index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot(pub u32);

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An immutable geolocated, timestamped, typed event.
///
/// Two Instances are identity-equal iff `(event_type, id)` match; `x`/`y`/`time_slot`
/// are not part of identity.
#[derive(Debug, Clone)]
pub struct Instance {
    pub event_type: EventType,
    pub id: InstanceId,
    pub x: f64,
    pub y: f64,
    pub time_slot: TimeSlot,
}

impl Instance {
    pub fn new(event_type: EventType, id: InstanceId, x: f64, y: f64, time_slot: TimeSlot) -> Self {
        Instance {
            event_type,
            id,
            x,
            y,
            time_slot,
        }
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.event_type == other.event_type && self.id == other.id
    }
}

impl Eq for Instance {}

impl std::hash::Hash for Instance {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.event_type.hash(state);
        self.id.hash(state);
    }
}

impl PartialOrd for Instance {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Instance {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (&self.event_type, self.id).cmp(&(&other.event_type, other.id))
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}{}>", self.event_type, self.id)
    }
}

/// A shared handle to an Instance. Instances are immutable and referenced from
/// many InstanceTables at once, so they are passed around as `Arc` rather than
/// copied.
pub type InstanceRef = Arc<Instance>;

/// A co-occurrence pattern: a set of distinct EventTypes in canonical (sorted) order.
///
/// Storing the pattern as a sorted `Vec` rather than a hash set makes equality,
/// subset tests, union, and the "first k-1 elements equal" check of Apriori-gen
/// all simple linear operations over the same representation used as the map key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pattern(Vec<EventType>);

impl Pattern {
    /// Builds a Pattern from an iterator of distinct EventTypes, canonicalizing
    /// (sorting, deduplicating) as it goes.
    pub fn from_event_types(types: impl IntoIterator<Item = EventType>) -> Self {
        let mut v: Vec<EventType> = types.into_iter().collect();
        v.sort();
        v.dedup();
        Pattern(v)
    }

    pub fn singleton(event_type: EventType) -> Self {
        Pattern(vec![event_type])
    }

    pub fn size(&self) -> usize {
        self.0.len()
    }

    pub fn is_singleton(&self) -> bool {
        self.0.len() == 1
    }

    pub fn event_types(&self) -> &[EventType] {
        &self.0
    }

    pub fn last(&self) -> &EventType {
        self.0.last().expect("Pattern is never empty")
    }

    /// The first k-1 elements, i.e. all but the last, in canonical order.
    pub fn prefix_elements(&self) -> &[EventType] {
        &self.0[..self.0.len() - 1]
    }

    pub fn contains(&self, event_type: &EventType) -> bool {
        self.0.binary_search(event_type).is_ok()
    }

    /// True iff `self` is a strict subset of `other`.
    pub fn is_strict_subset_of(&self, other: &Pattern) -> bool {
        self.0.len() < other.0.len() && self.0.iter().all(|e| other.contains(e))
    }

    /// Union of two patterns' event types, canonicalized.
    pub fn union(&self, other: &Pattern) -> Pattern {
        Pattern::from_event_types(self.0.iter().cloned().chain(other.0.iter().cloned()))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", e)?;
        }
        write!(f, "}}")
    }
}

/// An ordered pair of size-k Patterns whose union forms a size-(k+1) candidate:
/// their first k-1 elements are identical in canonical order and `last(left) < last(right)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubPatterns {
    pub left: Pattern,
    pub right: Pattern,
}
