//! # Fragment occupancy for typhoon plots
//!
//! Reads paired-end alignments over genomic windows and aggregates them into
//! occupancy matrices (template length × position) or midpoint density
//! curves, ready to be rendered.
//!
pub mod batching;
pub mod binner;
pub mod density;
pub mod reading;

pub use batching::{WindowBatch, plan_batches};
pub use binner::{BinningStats, OccupancyMatrix, RegionBinner};
pub use density::{DensityCurve, KernelDensity};
pub use reading::{BamReadSource, MemoryReadSource, ReadSource};
