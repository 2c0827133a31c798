use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use typhoon_core::errors::Result;
use typhoon_occupancy::DensityCurve;

use crate::layout::PlotLayout;
use crate::render_error;

/// Fixed top of the y axis; larger densities are cut off.
pub const DENSITY_Y_MAX: f64 = 50.0;
pub const DENSITY_Y_DESC: &str = "Read counts";

#[derive(Debug, Clone)]
pub struct DensityPanel {
    pub curve: DensityCurve,
    pub title: Option<String>,
    pub x_desc: Option<String>,
}

/// Curve points with y cut to the axis range.
pub fn density_points(curve: &DensityCurve) -> Vec<(f64, f64)> {
    curve
        .points()
        .map(|(x, y)| (x, y.clamp(0.0, DENSITY_Y_MAX)))
        .collect()
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &DensityPanel,
    layout: &PlotLayout,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let window = &panel.curve.window;

    let mut builder = ChartBuilder::on(area);
    builder
        .margin(layout.size(4.0))
        .x_label_area_size(layout.size(28.0))
        .y_label_area_size(layout.size(36.0));
    if let Some(title) = &panel.title {
        builder.caption(title, ("sans-serif", layout.font(11.0)));
    }

    let mut chart =
        builder.build_cartesian_2d(window.start as f64..window.end as f64, 0.0..DENSITY_Y_MAX)?;

    let x_labels = |x: &f64| format!("{:.0}", x);
    let mut mesh = chart.configure_mesh();
    mesh.light_line_style(BLACK.mix(0.05))
        .bold_line_style(BLACK.mix(0.15))
        .label_style(("sans-serif", layout.font(8.0)))
        .axis_desc_style(("sans-serif", layout.font(10.0)))
        .x_label_formatter(&x_labels)
        .y_desc(DENSITY_Y_DESC);
    if let Some(x_desc) = &panel.x_desc {
        mesh.x_desc(x_desc.as_str());
    }
    mesh.draw()?;

    chart.draw_series(
        AreaSeries::new(density_points(&panel.curve), 0.0, BLUE.mix(0.6)).border_style(BLUE),
    )?;

    Ok(())
}

///
/// Render one density curve per panel, stacked vertically, into `output`.
///
pub fn render_densities(
    output: &Path,
    figure_title: Option<&str>,
    panels: &[DensityPanel],
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
        draw_panel(area, panel, layout).map_err(render_error)?;
    }

    root.present().map_err(render_error)?;
    Ok(())
}
