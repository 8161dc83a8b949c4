//! Error kinds for the mining engine and its external collaborators.
//!
//! All variants are reported before mining begins; once `Miner::mine` starts
//! running, failure would indicate a programming bug rather than bad input.

use thiserror::Error;

/// Errors that can occur validating inputs to a mining run.
#[derive(Error, Debug)]
pub enum MdcopError {
    #[error("invalid time-slot window: first={first}, count={count}, dataset has {available} time slots")]
    InvalidWindow {
        first: i64,
        count: i64,
        available: usize,
    },

    #[error("invalid threshold {name}={value}: must be in (0, 1]")]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error("invalid distance threshold dt={value}: must be > 0")]
    InvalidDistanceThreshold { value: f64 },

    #[error("unrecognized distance function '{name}': expected 'euclidean' or 'latlon'")]
    InvalidDistanceName { name: String },

    #[error("dataset is empty: no event types or no time slots")]
    EmptyDataset,

    #[error("I/O error reading dataset: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the mining engine.
pub type Result<T> = std::result::Result<T, MdcopError>;
