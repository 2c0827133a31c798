/// Longest fragment (template length) given its own heatmap row.
pub const DEFAULT_MAX_LEN: usize = 250;

/// Saturation ceilings for the single-window and multi-window heatmaps.
pub const TYPHOON_CEILING: u32 = 15;
pub const WINDOWS_CEILING: u32 = 30;

/// Sampling step of the density curve, in bases.
pub const DEFAULT_BANDWIDTH: i64 = 30;
pub const DEFAULT_KERNEL_SD: f64 = 1.0;

/// Windows per output file in multi-window mode.
pub const DEFAULT_BATCH_SIZE: usize = 30;

pub const FIGURE_DPI: u32 = 300;
pub const WINDOWS_DPI: u32 = 100;

pub const DEFAULT_GENE_FILE: &str = "genebodies.txt";
