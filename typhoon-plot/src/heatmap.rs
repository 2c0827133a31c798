use std::ops::Range;
use std::path::Path;

use plotters::coord::Shift;
use plotters::coord::types::{RangedCoordi32, RangedCoordi64};
use plotters::prelude::*;

use typhoon_core::errors::Result;
use typhoon_core::models::GeneBody;
use typhoon_occupancy::OccupancyMatrix;

use crate::color::ColorScale;
use crate::genes::{draw_gene_bodies, gene_glyphs};
use crate::layout::PlotLayout;
use crate::render_error;

/// Chart coordinates of a heatmap: genomic position by fragment length.
pub type OccupancyCoord = Cartesian2d<RangedCoordi64, RangedCoordi32>;

///
/// Maps fragment lengths onto the chart's y axis. With `short_on_top` the
/// axis is flipped so that short fragments are drawn at the top; the mapping
/// is its own inverse, so the same function labels the ticks.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragmentAxis {
    max_len: i32,
    short_on_top: bool,
}

impl FragmentAxis {
    pub fn new(max_len: usize, short_on_top: bool) -> Self {
        FragmentAxis {
            max_len: max_len as i32,
            short_on_top,
        }
    }

    pub fn range(&self) -> Range<i32> {
        0..self.max_len + 1
    }

    /// Chart y of the horizontal line at fragment length `length`.
    pub fn line(&self, length: i32) -> i32 {
        if self.short_on_top {
            self.max_len + 1 - length
        } else {
            length
        }
    }

    pub fn span(&self, low: i32, high: i32) -> (i32, i32) {
        (self.line(low), self.line(high))
    }

    /// Vertical extent of the cells of one matrix row.
    pub fn cell(&self, row: usize) -> (i32, i32) {
        self.span(row as i32, row as i32 + 1)
    }
}

///
/// One subplot: a matrix and the labels drawn around it. Condensed figures
/// leave every label empty.
///
#[derive(Debug, Clone)]
pub struct HeatmapPanel {
    pub matrix: OccupancyMatrix,
    pub title: Option<String>,
    pub x_desc: Option<String>,
    pub y_desc: Option<String>,
}

impl HeatmapPanel {
    pub fn bare(matrix: OccupancyMatrix) -> Self {
        HeatmapPanel {
            matrix,
            title: None,
            x_desc: None,
            y_desc: None,
        }
    }
}

/// Chart rectangle covering the cell of `row` at genomic `position`.
pub fn cell_rect(position: i64, row: usize, axis: &FragmentAxis) -> [(i64, i32); 2] {
    let (y0, y1) = axis.cell(row);
    [(position, y0), (position + 1, y1)]
}

///
/// Fill every non-empty cell of `matrix` with its colour. Empty cells are
/// left as the background, which is the low end of the scale.
///
pub fn paint_occupancy<DB: DrawingBackend>(
    area: &DrawingArea<DB, OccupancyCoord>,
    matrix: &OccupancyMatrix,
    scale: &ColorScale,
    axis: &FragmentAxis,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    for (row, position, count) in matrix.occupied_cells() {
        area.draw(&Rectangle::new(
            cell_rect(position, row, axis),
            scale.color(count).filled(),
        ))?;
    }
    Ok(())
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &HeatmapPanel,
    genes: &[GeneBody],
    layout: &PlotLayout,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let matrix = &panel.matrix;
    let window = matrix.window();
    let axis = FragmentAxis::new(matrix.max_len(), layout.short_on_top);

    let mut builder = ChartBuilder::on(area);
    builder
        .margin(layout.size(4.0))
        .x_label_area_size(layout.size(if panel.x_desc.is_some() { 28.0 } else { 14.0 }))
        .y_label_area_size(layout.size(if panel.y_desc.is_some() { 36.0 } else { 24.0 }));
    if let Some(title) = &panel.title {
        builder.caption(title, ("sans-serif", layout.font(11.0)));
    }

    let mut chart = builder.build_cartesian_2d(window.start..window.end + 1, axis.range())?;

    let y_labels = |y: &i32| axis.line(*y).to_string();
    let mut mesh = chart.configure_mesh();
    mesh.disable_mesh()
        .label_style(("sans-serif", layout.font(8.0)))
        .axis_desc_style(("sans-serif", layout.font(10.0)))
        .y_label_formatter(&y_labels);
    if let Some(x_desc) = &panel.x_desc {
        mesh.x_desc(x_desc.as_str());
    }
    if let Some(y_desc) = &panel.y_desc {
        mesh.y_desc(y_desc.as_str());
    }
    mesh.draw()?;

    let plotting_area = chart.plotting_area();
    paint_occupancy(
        plotting_area,
        matrix,
        &ColorScale::new(matrix.ceiling()),
        &axis,
    )?;
    draw_gene_bodies(
        plotting_area,
        &gene_glyphs(genes, window),
        &axis,
        layout.font(8.0),
    )?;

    Ok(())
}

///
/// Render `panels` stacked vertically into one PNG at `output`.
///
/// # Arguments
///
/// - output: path of the PNG to write
/// - figure_title: caption above all panels, if any
/// - panels: one heatmap per subplot, top to bottom
/// - genes: gene bodies overlaid on every panel they overlap
/// - layout: figure size, resolution and axis orientation
///
pub fn render_heatmaps(
    output: &Path,
    figure_title: Option<&str>,
    panels: &[HeatmapPanel],
    genes: &[GeneBody],
    layout: &PlotLayout,
) -> Result<()> {
    let root = BitMapBackend::new(output, layout.figure_size(panels.len())).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;

    let root = match figure_title {
        Some(title) => root
            .titled(title, ("sans-serif", layout.font(12.0)))
            .map_err(render_error)?,
        None => root,
    };

    let areas = root.split_evenly((panels.len().max(1), 1));
    for (panel, area) in panels.iter().zip(areas.iter()) {
        draw_panel(area, panel, genes, layout).map_err(render_error)?;
    }

    root.present().map_err(render_error)?;
    Ok(())
}
