//! Library surface behind the `mdcop` binary: argument validation, dataset
//! parsing, mining, and console reporting, split out of `main.rs` so the
//! full dataset-parse -> mine -> report path can be driven from integration
//! tests without spawning a subprocess.

pub mod args;
pub mod dataset;
pub mod report;

use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result};
use hashbrown::HashSet;
use mdcop_core::{EarlyPrune, MdcopError, Miner, Pattern, Thresholds, TimeWindow};
use mdcop_geo::{EuclideanDistance, LatLonDistance, NeighborPredicate};
use tracing_subscriber::EnvFilter;

use args::{Args, Distance};

/// Runs the full CLI pipeline for an already-parsed [`Args`], printing the
/// same progress and result report the binary prints, and returning the
/// mined patterns so callers (tests, in particular) can assert on them
/// directly instead of scraping stdout.
pub fn run(args: &Args) -> Result<hashbrown::HashMap<usize, HashSet<Pattern>>> {
    validate_pre_parse(args)?;

    report::print_validated_arguments(args);

    let file = File::open(&args.dataset_path)
        .with_context(|| format!("failed to open dataset file {}", args.dataset_path.display()))?;
    let dataset =
        dataset::parse_dataset(BufReader::new(file)).with_context(|| "failed to read dataset file")?;

    report::print_dataset_summary(&dataset);

    let available = dataset.time_slot_count();
    let clamped_first = (args.first_time_slot as usize).min(available.saturating_sub(1));
    let clamped_count = (args.time_slot_count as usize).min(available.saturating_sub(clamped_first));
    report::print_clamped_window(clamped_first, clamped_count);

    let window = TimeWindow::new(clamped_first as i64, clamped_count as i64, available)?;
    let thresholds = Thresholds::new(args.spt, args.tpt)?;

    let predicate: Box<dyn NeighborPredicate> = match args.distance {
        Distance::Euclidean => Box::new(EuclideanDistance::new(args.distance_threshold)?),
        Distance::Latlon => Box::new(LatLonDistance::new(args.distance_threshold)?),
    };

    let early_prune = if args.no_early_prune {
        EarlyPrune::Disabled
    } else {
        EarlyPrune::Enabled
    };

    let miner = Miner::new(&dataset, predicate.as_ref(), window, thresholds).with_early_prune(early_prune);
    let results = miner.mine()?;

    report::print_results(&results);

    Ok(results)
}

/// Initializes the `tracing` subscriber at a verbosity derived from `-v`
/// repetitions (`warn` by default, up to `trace` at `-vvv`), unless
/// `RUST_LOG` is already set.
pub fn init_logging(verbosity: u8) {
    let default_directive = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Structural validation of the raw CLI arguments, before the dataset file
/// is even opened.
fn validate_pre_parse(args: &Args) -> std::result::Result<(), MdcopError> {
    if args.first_time_slot < 0 || args.time_slot_count <= 0 {
        return Err(MdcopError::InvalidWindow {
            first: args.first_time_slot,
            count: args.time_slot_count,
            available: 0,
        });
    }
    if !(0.0 < args.spt && args.spt <= 1.0) {
        return Err(MdcopError::InvalidThreshold {
            name: "spt",
            value: args.spt,
        });
    }
    if !(0.0 < args.tpt && args.tpt <= 1.0) {
        return Err(MdcopError::InvalidThreshold {
            name: "tpt",
            value: args.tpt,
        });
    }
    if !(args.distance_threshold > 0.0) {
        return Err(MdcopError::InvalidDistanceThreshold {
            value: args.distance_threshold,
        });
    }
    Ok(())
}
