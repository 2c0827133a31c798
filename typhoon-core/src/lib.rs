//! # Core models for typhoon
//!
//! Genomic windows, read records and gene bodies shared by the binning and
//! plotting crates, together with the run configuration, error type and a few
//! small file utilities.
//!
pub mod config;
pub mod consts;
pub mod errors;
pub mod models;
pub mod utils;

pub use config::{OutOfRangePolicy, PlotConfig, PlotMode};
pub use errors::{Result, TyphoonError};
