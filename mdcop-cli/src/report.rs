//! Console reporting: validated arguments, dataset summary, clamped window,
//! and the final mined patterns, printed in ascending size order.

use hashbrown::HashMap;
use mdcop_core::Pattern;

use crate::args::{Args, Distance};
use crate::dataset::Dataset;

pub fn print_validated_arguments(args: &Args) {
    println!("Validated arguments:");
    println!("  dataset_path: {}", args.dataset_path.display());
    println!("  first_time_slot: {}", args.first_time_slot);
    println!("  time_slot_count: {}", args.time_slot_count);
    println!(
        "  distance: {}",
        match args.distance {
            Distance::Euclidean => "euclidean",
            Distance::Latlon => "latlon",
        }
    );
    println!("  distance_threshold: {}", args.distance_threshold);
    println!("  spt: {}", args.spt);
    println!("  tpt: {}", args.tpt);
    println!();
}

pub fn print_dataset_summary(dataset: &Dataset) {
    println!("Dataset summary:");
    println!("  instance count: {}", dataset.total_instance_count());
    let types: Vec<&str> = dataset
        .instance_counts_by_event_type()
        .into_iter()
        .map(|(e, _)| e.as_str())
        .collect();
    println!("  event types: {:?}", types);
    println!("  instance count by event type:");
    for (event_type, count) in dataset.instance_counts_by_event_type() {
        println!("    {event_type}: {count}");
    }
    println!("  time slot count: {}", dataset.time_slot_count());
    println!("  instance count by time slot:");
    for (slot, count) in dataset.instance_counts_by_time_slot() {
        println!("    {slot}: {count}");
    }
    println!();
}

pub fn print_clamped_window(first: usize, count: usize) {
    println!("Clamped time-slot window:");
    println!("  first_time_slot: {first}");
    println!("  time_slot_count: {count}");
    println!();
}

pub fn print_results(results: &HashMap<usize, hashbrown::HashSet<Pattern>>) {
    println!("Closed Mixed-Drove Spatiotemporal Co-Occurrence Patterns:");
    let mut sizes: Vec<&usize> = results.keys().collect();
    sizes.sort();
    for size in sizes {
        let mut patterns: Vec<&Pattern> = results[size].iter().collect();
        patterns.sort();
        let rendered: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        println!("  size={size}: {{{}}}", rendered.join(", "));
    }
}
