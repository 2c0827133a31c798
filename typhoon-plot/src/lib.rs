//! # Typhoon plots
//!
//! Renders occupancy matrices as white-to-blue heatmaps ("typhoon plots")
//! and midpoint density curves as filled area plots, with an optional
//! gene body overlay, into PNG files.
//!
//! The entry point is [`run_plot`], which validates a [`PlotConfig`] and runs
//! the pipeline of its mode.
//!
//! [`PlotConfig`]: typhoon_core::PlotConfig
//!
pub mod color;
pub mod density;
pub mod genes;
pub mod heatmap;
pub mod layout;
pub mod pipeline;

use std::fmt::Display;

use typhoon_core::TyphoonError;

pub use color::ColorScale;
pub use heatmap::{HeatmapPanel, render_heatmaps};
pub use layout::PlotLayout;
pub use pipeline::run_plot;

pub(crate) fn render_error<E: Display>(e: E) -> TyphoonError {
    TyphoonError::Render(e.to_string())
}
