//! Line-based dataset text parser and the concrete [`DatasetView`] it builds.

use std::io::BufRead;

use hashbrown::{HashMap, HashSet};
use mdcop_core::{DatasetView, EventType, Instance, InstanceId, InstanceRef, TimeSlot};
use tracing::warn;

/// The number of malformed-line warnings logged individually before further
/// skips are only counted, not logged one by one.
const MALFORMED_LINE_WARNING_CAP: usize = 20;

/// An in-memory dataset indexed the three ways [`DatasetView`] requires.
pub struct Dataset {
    event_types: HashSet<EventType>,
    by_event_type: HashMap<EventType, Vec<InstanceRef>>,
    by_time_slot: HashMap<u32, Vec<InstanceRef>>,
}

impl DatasetView for Dataset {
    fn event_types(&self) -> &HashSet<EventType> {
        &self.event_types
    }

    fn objects_by_event_type(&self, event_type: &EventType) -> &[InstanceRef] {
        self.by_event_type
            .get(event_type)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    fn objects_by_time_slot(&self, time_slot: TimeSlot) -> &[InstanceRef] {
        self.by_time_slot
            .get(&time_slot.0)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    fn time_slot_count(&self) -> usize {
        self.by_time_slot.len()
    }
}

impl Dataset {
    pub fn total_instance_count(&self) -> usize {
        self.by_event_type.values().map(Vec::len).sum()
    }

    pub fn instance_counts_by_event_type(&self) -> Vec<(&EventType, usize)> {
        let mut counts: Vec<_> = self
            .by_event_type
            .iter()
            .map(|(e, v)| (e, v.len()))
            .collect();
        counts.sort_by(|a, b| a.0.cmp(b.0));
        counts
    }

    pub fn instance_counts_by_time_slot(&self) -> Vec<(u32, usize)> {
        let mut counts: Vec<_> = self.by_time_slot.iter().map(|(&s, v)| (s, v.len())).collect();
        counts.sort_by_key(|(s, _)| *s);
        counts
    }
}

/// Parses a dataset from whitespace-separated `event_type x y time_slot`
/// lines, skipping malformed lines with a logged warning.
pub fn parse_dataset<R: BufRead>(reader: R) -> std::io::Result<Dataset> {
    let mut event_types: HashSet<EventType> = HashSet::new();
    let mut by_event_type: HashMap<EventType, Vec<InstanceRef>> = HashMap::new();
    let mut by_time_slot: HashMap<u32, Vec<InstanceRef>> = HashMap::new();
    let mut skipped = 0usize;

    for line in reader.lines() {
        let line = line?;
        match parse_line(&line) {
            Some((event_type, x, y, time_slot)) => {
                let id = InstanceId(
                    by_event_type
                        .get(&event_type)
                        .map(Vec::len)
                        .unwrap_or(0) as u32,
                );
                let instance: InstanceRef =
                    std::sync::Arc::new(Instance::new(event_type.clone(), id, x, y, time_slot));

                event_types.insert(event_type.clone());
                by_event_type
                    .entry(event_type)
                    .or_default()
                    .push(instance.clone());
                by_time_slot.entry(time_slot.0).or_default().push(instance);
            }
            None => {
                skipped += 1;
                if skipped <= MALFORMED_LINE_WARNING_CAP {
                    warn!(line = %line, "skipping malformed dataset line");
                }
            }
        }
    }

    if skipped > MALFORMED_LINE_WARNING_CAP {
        warn!(
            skipped,
            capped_at = MALFORMED_LINE_WARNING_CAP,
            "additional malformed lines were skipped and not individually logged"
        );
    }

    Ok(Dataset {
        event_types,
        by_event_type,
        by_time_slot,
    })
}

fn parse_line(line: &str) -> Option<(EventType, f64, f64, TimeSlot)> {
    let mut tokens = line.split_whitespace();
    let event_type = tokens.next()?;
    let x = tokens.next()?.parse::<f64>().ok()?;
    let y = tokens.next()?.parse::<f64>().ok()?;
    let time_slot = tokens.next()?.parse::<u32>().ok()?;
    if tokens.next().is_some() {
        return None;
    }
    let event_type = EventType::new(event_type).ok()?;
    Some((event_type, x, y, TimeSlot(time_slot)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_well_formed_lines() {
        let data = "A 1.0 2.0 0\nB 3.0 4.0 0\nA 5.0 6.0 1\n";
        let dataset = parse_dataset(Cursor::new(data)).unwrap();
        assert_eq!(dataset.total_instance_count(), 3);
        assert_eq!(dataset.time_slot_count(), 2);
        assert_eq!(dataset.event_types().len(), 2);
    }

    #[test]
    fn assigns_ids_sequentially_per_event_type_independent_of_time_slot() {
        let data = "A 0 0 5\nA 0 0 0\nA 0 0 3\n";
        let dataset = parse_dataset(Cursor::new(data)).unwrap();
        let a = EventType::from("A");
        let ids: Vec<u32> = dataset
            .objects_by_event_type(&a)
            .iter()
            .map(|i| i.id.0)
            .collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn skips_malformed_lines() {
        let data = "A 1.0 2.0 0\nmalformed line here extra tokens too\nA not_a_number 2.0 0\nA 1.0\n";
        let dataset = parse_dataset(Cursor::new(data)).unwrap();
        assert_eq!(dataset.total_instance_count(), 1);
    }

    #[test]
    fn empty_input_yields_empty_dataset() {
        let dataset = parse_dataset(Cursor::new("")).unwrap();
        assert_eq!(dataset.total_instance_count(), 0);
        assert_eq!(dataset.time_slot_count(), 0);
    }
}
