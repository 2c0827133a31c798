/// Figures are 15 inches wide whatever the number of panels.
pub const FIGURE_WIDTH_IN: f64 = 15.0;
pub const FULL_PANEL_HEIGHT_IN: f64 = 6.0;
pub const CONDENSED_PANEL_HEIGHT_IN: f64 = 2.0;

///
/// Physical layout of a figure: panel size, resolution and orientation of
/// the fragment length axis. Sizes are given in inches and points and
/// converted to pixels with `dpi`.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotLayout {
    pub condensed: bool,
    pub dpi: u32,
    pub short_on_top: bool,
}

impl PlotLayout {
    pub fn full(dpi: u32) -> Self {
        PlotLayout {
            condensed: false,
            dpi,
            short_on_top: false,
        }
    }

    pub fn condensed(dpi: u32) -> Self {
        PlotLayout {
            condensed: true,
            dpi,
            short_on_top: false,
        }
    }

    pub fn panel_height_in(&self) -> f64 {
        if self.condensed {
            CONDENSED_PANEL_HEIGHT_IN
        } else {
            FULL_PANEL_HEIGHT_IN
        }
    }

    /// Pixel size of a figure stacking `n_panels` panels vertically.
    pub fn figure_size(&self, n_panels: usize) -> (u32, u32) {
        let width = FIGURE_WIDTH_IN * self.dpi as f64;
        let height = n_panels.max(1) as f64 * self.panel_height_in() * self.dpi as f64;
        (width.round() as u32, height.round() as u32)
    }

    /// Font size in pixels for a size in points.
    pub fn font(&self, points: f64) -> f64 {
        points * self.dpi as f64 / 72.0
    }

    /// Length in pixels for a length in points.
    pub fn size(&self, points: f64) -> u32 {
        self.font(points).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case(PlotLayout::full(100), 3, (1500, 1800))]
    #[case(PlotLayout::condensed(100), 3, (1500, 600))]
    #[case(PlotLayout::full(300), 1, (4500, 1800))]
    #[case(PlotLayout::full(100), 0, (1500, 600))]
    fn test_figure_size(#[case] layout: PlotLayout, #[case] n: usize, #[case] expected: (u32, u32)) {
        assert_eq!(layout.figure_size(n), expected);
    }

    #[rstest]
    fn test_point_conversion() {
        let layout = PlotLayout::full(144);
        assert_eq!(layout.font(10.0), 20.0);
        assert_eq!(layout.size(36.0), 72);
    }
}
