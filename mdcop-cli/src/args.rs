//! Command-line argument surface: positional dataset path, time-slot window,
//! distance function and threshold, then the spatial and time prevalence
//! thresholds, plus `--verbose` for log level and `--no-early-prune` to
//! disable the TimePrevalence pruning optimization.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Mine Closed Mixed-Drove Spatiotemporal Co-occurrence Patterns from a dataset.
#[derive(Debug, Parser)]
#[command(
    name = "mdcop",
    version,
    about,
    after_help = "Example: mdcop dataset.txt 0 3 latlon 2 0.3 0.2"
)]
pub struct Args {
    /// Path to the dataset file
    pub dataset_path: PathBuf,

    /// The starting time slot
    pub first_time_slot: i64,

    /// The number of time slots to mine
    pub time_slot_count: i64,

    /// The distance function to use
    #[arg(value_enum)]
    pub distance: Distance,

    /// The maximum distance for considering two objects neighbors
    pub distance_threshold: f64,

    /// The spatial prevalence threshold, 0 < spt <= 1
    pub spt: f64,

    /// The time prevalence threshold, 0 < tpt <= 1
    pub tpt: f64,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable the TimePrevalence early-pruning optimization
    #[arg(long)]
    pub no_early_prune: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Distance {
    Euclidean,
    Latlon,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_a_full_example_invocation() {
        let args = Args::parse_from([
            "mdcop",
            "dataset.txt",
            "0",
            "3",
            "latlon",
            "2",
            "0.3",
            "0.2",
        ]);
        assert_eq!(args.first_time_slot, 0);
        assert_eq!(args.time_slot_count, 3);
        assert_eq!(args.distance, Distance::Latlon);
        assert_eq!(args.distance_threshold, 2.0);
        assert_eq!(args.spt, 0.3);
        assert_eq!(args.tpt, 0.2);
        assert!(!args.no_early_prune);
    }
}
