use std::path::Path;

use log::{info, warn};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use typhoon_core::models::{GeneBody, GenomicWindow, read_gene_bodies};

use crate::heatmap::{FragmentAxis, OccupancyCoord};

/// Vertical extent of a gene body, in fragment length units.
pub const GENE_BOTTOM: i32 = 15;
pub const GENE_TOP: i32 = 27;
pub const GENE_LABEL_Y: i32 = 21;

/// 60% grey.
const GENE_FILL: RGBColor = RGBColor(153, 153, 153);
const GENE_ALPHA: f64 = 0.6;

///
/// A gene body as drawn on one window: a rectangle spanning `[left, right]`
/// (cut to the window) and a label centred on the visible part.
///
#[derive(Debug, Clone, PartialEq)]
pub struct GeneGlyph {
    pub name: String,
    pub left: i64,
    pub right: i64,
    pub bottom: i32,
    pub top: i32,
    pub label_x: f64,
    pub label_y: i32,
}

pub fn gene_glyphs(genes: &[GeneBody], window: &GenomicWindow) -> Vec<GeneGlyph> {
    genes
        .iter()
        .filter(|gene| gene.overlaps(window))
        .map(|gene| {
            let left = gene.left.max(window.start);
            let right = gene.right.min(window.end);
            GeneGlyph {
                name: gene.name.clone(),
                left,
                right,
                bottom: GENE_BOTTOM,
                top: GENE_TOP,
                label_x: 0.5 * (left + right) as f64,
                label_y: GENE_LABEL_Y,
            }
        })
        .collect()
}

///
/// Load gene bodies for the overlay. A missing or malformed file is logged
/// and the plot is drawn without genes.
///
pub fn load_gene_bodies(path: &Path) -> Vec<GeneBody> {
    match read_gene_bodies(path) {
        Ok(genes) => {
            info!("Loaded {} gene bodies from {:?}", genes.len(), path);
            genes
        }
        Err(e) => {
            warn!("{}. Plotting without gene bodies.", e);
            Vec::new()
        }
    }
}

pub fn draw_gene_bodies<DB: DrawingBackend>(
    area: &DrawingArea<DB, OccupancyCoord>,
    glyphs: &[GeneGlyph],
    axis: &FragmentAxis,
    font_size: f64,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let label_style = TextStyle::from(("sans-serif", font_size).into_font())
        .pos(Pos::new(HPos::Center, VPos::Center));

    for glyph in glyphs {
        let (y0, y1) = axis.span(glyph.bottom, glyph.top);
        area.draw(&Rectangle::new(
            [(glyph.left, y0), (glyph.right, y1)],
            GENE_FILL.mix(GENE_ALPHA).filled(),
        ))?;

        area.draw(&Text::new(
            glyph.name.clone(),
            (glyph.label_x.round() as i64, axis.line(glyph.label_y)),
            label_style.clone(),
        ))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn pho5() -> GeneBody {
        GeneBody {
            name: "PHO5".to_string(),
            left: 100,
            right: 400,
        }
    }

    #[rstest]
    fn test_single_gene_glyph(pho5: GeneBody) {
        let window = GenomicWindow::new("chrII", 0, 1000).unwrap();
        let glyphs = gene_glyphs(&[pho5], &window);

        assert_eq!(
            glyphs,
            vec![GeneGlyph {
                name: "PHO5".to_string(),
                left: 100,
                right: 400,
                bottom: 15,
                top: 27,
                label_x: 250.0,
                label_y: 21,
            }]
        );
    }

    #[rstest]
    fn test_glyph_cut_to_window(pho5: GeneBody) {
        let window = GenomicWindow::new("chrII", 300, 1000).unwrap();
        let glyphs = gene_glyphs(&[pho5], &window);

        assert_eq!(glyphs[0].left, 300);
        assert_eq!(glyphs[0].right, 400);
        assert_eq!(glyphs[0].label_x, 350.0);
    }

    #[rstest]
    fn test_gene_outside_window(pho5: GeneBody) {
        let window = GenomicWindow::new("chrII", 5000, 6000).unwrap();
        assert!(gene_glyphs(&[pho5], &window).is_empty());
    }

    #[rstest]
    fn test_load_missing_gene_file_is_empty() {
        assert!(load_gene_bodies(Path::new("does/not/exist.txt")).is_empty());
    }
}
