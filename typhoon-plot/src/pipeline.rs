//! Per-mode plotting pipelines: fetch reads for every window, aggregate them
//! and hand the panels to a renderer.
//!
//! Each pipeline takes the function opening an input and the function writing
//! a figure as arguments, so that the aggregation can be driven from memory.
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};

use typhoon_core::errors::{Result, TyphoonError};
use typhoon_core::models::{GeneBody, GenomicWindow};
use typhoon_core::utils::{batch_output_path, file_label, remove_all_extensions};
use typhoon_core::{PlotConfig, PlotMode};
use typhoon_occupancy::{
    BamReadSource, BinningStats, KernelDensity, ReadSource, RegionBinner, WindowBatch,
    plan_batches,
};

use crate::density::{DensityPanel, render_densities};
use crate::genes::load_gene_bodies;
use crate::heatmap::{HeatmapPanel, render_heatmaps};
use crate::layout::PlotLayout;

pub const FRAGMENT_LENGTH_DESC: &str = "Fragment Length (bp)";

///
/// Validate `config`, then draw every figure it describes.
///
/// Returns the paths of the written images.
///
pub fn run_plot(config: &PlotConfig) -> Result<Vec<PathBuf>> {
    config.validate()?;
    info!(
        "Plotting {} input(s) in {} mode on {}",
        config.inputs.len(),
        config.mode,
        config.chromosome
    );

    let outputs = match config.mode {
        PlotMode::Typhoon => plot_typhoon(config, BamReadSource::open, render_heatmaps)?,
        PlotMode::Windows => plot_windows(config, BamReadSource::open, render_heatmaps)?,
        PlotMode::Density => plot_density(config, BamReadSource::open, render_densities)?,
    };

    for output in outputs.iter() {
        info!("Wrote {:?}", output);
    }
    Ok(outputs)
}

fn layout_for(config: &PlotConfig) -> PlotLayout {
    let mut layout = if config.condensed {
        PlotLayout::condensed(config.dpi())
    } else {
        PlotLayout::full(config.dpi())
    };
    layout.short_on_top = config.short_on_top;
    layout
}

fn single_window(config: &PlotConfig) -> Result<GenomicWindow> {
    config.windows()?.into_iter().next().ok_or_else(|| {
        TyphoonError::InvalidParameter(format!("{} mode needs a window", config.mode))
    })
}

fn gene_bodies(config: &PlotConfig) -> Vec<GeneBody> {
    config
        .gene_file()
        .map(|path| load_gene_bodies(&path))
        .unwrap_or_default()
}

fn chromosome_desc(config: &PlotConfig) -> String {
    format!(
        "Position on chromosome {} (center: {})",
        config.chromosome, config.origin
    )
}

fn report_stats(input: &Path, window: &GenomicWindow, stats: &BinningStats, max_len: usize) {
    if stats.dropped > 0 {
        warn!(
            "{:?}: dropped {} read(s) in {} with a template length outside 0..={}",
            input, stats.dropped, window, max_len
        );
    }
    if stats.clamped > 0 {
        info!(
            "{:?}: clamped the template length of {} read(s) in {}",
            input, stats.clamped, window
        );
    }
}

///
/// One heatmap per input over the window around `origin`, all in one figure.
///
pub fn plot_typhoon<S, O, R>(config: &PlotConfig, mut open: O, mut render: R) -> Result<Vec<PathBuf>>
where
    S: ReadSource,
    O: FnMut(&Path) -> Result<S>,
    R: FnMut(&Path, Option<&str>, &[HeatmapPanel], &[GeneBody], &PlotLayout) -> Result<()>,
{
    let window = single_window(config)?;
    let binner = RegionBinner::new(config.max_len, config.ceiling(), config.out_of_range);
    let layout = layout_for(config);

    let mut panels = Vec::with_capacity(config.inputs.len());
    for input in config.inputs.iter() {
        info!("Processing {:?}", input);
        let mut source = open(input)?;
        let reads = source.fetch(&window)?;
        let (matrix, stats) = binner.bin(&window, reads);
        report_stats(input, &window, &stats, config.max_len);

        let panel = if layout.condensed {
            HeatmapPanel::bare(matrix)
        } else {
            HeatmapPanel {
                matrix,
                title: Some(file_label(input)),
                x_desc: Some(chromosome_desc(config)),
                y_desc: Some(FRAGMENT_LENGTH_DESC.to_string()),
            }
        };
        panels.push(panel);
    }

    let genes = gene_bodies(config);
    let title = layout.condensed.then(|| file_label(&config.output));
    render(&config.output, title.as_deref(), &panels, &genes, &layout)?;

    Ok(vec![config.output.clone()])
}

/// Progress of the `j`-th window of `batch`, counted over every file and window.
fn progress_message(batch: &WindowBatch, j: usize, n_files: usize, n_windows: usize) -> String {
    format!(
        "file {} of {}, region {} of {}",
        batch.index,
        n_files,
        batch.offset + j + 1,
        n_windows
    )
}

///
/// One heatmap per tile of a single input. Tiles are grouped into batches
/// and every batch is written to its own file before the next is read.
///
pub fn plot_windows<S, O, R>(config: &PlotConfig, mut open: O, mut render: R) -> Result<Vec<PathBuf>>
where
    S: ReadSource,
    O: FnMut(&Path) -> Result<S>,
    R: FnMut(&Path, Option<&str>, &[HeatmapPanel], &[GeneBody], &PlotLayout) -> Result<()>,
{
    let input = config.inputs.first().ok_or_else(|| {
        TyphoonError::InvalidParameter("windows mode requires an input file".to_string())
    })?;
    let windows = config.windows()?;
    let batches = plan_batches(&windows, config.batch_size)?;
    let binner = RegionBinner::new(config.max_len, config.ceiling(), config.out_of_range);
    let layout = layout_for(config);
    let genes = gene_bodies(config);

    info!(
        "Splitting {} windows of {:?} into {} file(s)",
        windows.len(),
        input,
        batches.len()
    );
    let mut source = open(input)?;

    let pb = ProgressBar::new(windows.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
    );

    let mut outputs = Vec::with_capacity(batches.len());
    for batch in batches.iter() {
        info!("File {} of {}", batch.index, batches.len());

        let mut panels = Vec::with_capacity(batch.windows.len());
        for (j, window) in batch.windows.iter().enumerate() {
            pb.set_message(progress_message(batch, j, batches.len(), windows.len()));
            let reads = source.fetch(window)?;
            let (matrix, stats) = binner.bin(window, reads);
            report_stats(input, window, &stats, config.max_len);

            panels.push(HeatmapPanel {
                matrix,
                title: None,
                x_desc: Some(format!("Position from {}:{}", window.chrom, window.start)),
                y_desc: Some(FRAGMENT_LENGTH_DESC.to_string()),
            });
            pb.inc(1);
        }

        let output = batch_output_path(&config.output, batch.index);
        render(&output, None, &panels, &genes, &layout)?;
        outputs.push(output);
    }

    pb.finish_with_message("done");
    Ok(outputs)
}

///
/// One midpoint density curve per input over the window around `origin`.
///
pub fn plot_density<S, O, R>(config: &PlotConfig, mut open: O, mut render: R) -> Result<Vec<PathBuf>>
where
    S: ReadSource,
    O: FnMut(&Path) -> Result<S>,
    R: FnMut(&Path, Option<&str>, &[DensityPanel], &PlotLayout) -> Result<()>,
{
    let window = single_window(config)?;
    let estimator = KernelDensity::new(config.bandwidth, config.kernel_sd);
    let layout = layout_for(config);

    let mut panels = Vec::with_capacity(config.inputs.len());
    for input in config.inputs.iter() {
        info!("Processing {:?}", input);
        let mut source = open(input)?;
        let reads = source.fetch(&window)?;
        let curve = estimator.estimate(&window, reads)?;
        debug!("{:?}: density peak {:.3} in {}", input, curve.peak(), window);

        panels.push(DensityPanel {
            curve,
            title: (!layout.condensed).then(|| file_label(input)),
            x_desc: Some(chromosome_desc(config)),
        });
    }

    let title = config
        .title
        .clone()
        .unwrap_or_else(|| remove_all_extensions(&config.output));
    render(&config.output, Some(&title), &panels, &layout)?;

    Ok(vec![config.output.clone()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::cell::RefCell;
    use std::io::Write;
    use std::rc::Rc;

    use typhoon_core::OutOfRangePolicy;
    use typhoon_core::models::ReadRecord;
    use typhoon_occupancy::MemoryReadSource;

    /// Records every fetch in a shared event log.
    struct LoggedSource {
        inner: MemoryReadSource,
        events: Rc<RefCell<Vec<String>>>,
    }

    impl ReadSource for LoggedSource {
        fn fetch(&mut self, window: &GenomicWindow) -> Result<Vec<ReadRecord>> {
            self.events.borrow_mut().push(format!("fetch {}", window.start));
            self.inner.fetch(window)
        }
    }

    #[fixture]
    fn reads() -> Vec<ReadRecord> {
        vec![
            ReadRecord::new(1000, 150),
            ReadRecord::new(1040, 147),
            ReadRecord::new(1100, -150),
            ReadRecord::new(1200, 400),
        ]
    }

    #[fixture]
    fn typhoon_config() -> PlotConfig {
        let mut config = PlotConfig::new(
            PlotMode::Typhoon,
            "chrII",
            1100,
            PathBuf::from("plots/936-941.png"),
        );
        config.offset = Some(200);
        config.inputs = vec![PathBuf::from("DM936.bam"), PathBuf::from("DM941.bam")];
        config.genes = Some(PathBuf::from("does/not/exist.txt"));
        config
    }

    #[rstest]
    fn test_plot_typhoon_full(typhoon_config: PlotConfig, reads: Vec<ReadRecord>) {
        let mut opened = Vec::new();
        let mut rendered = Vec::new();

        let outputs = plot_typhoon(
            &typhoon_config,
            |path| {
                opened.push(path.to_path_buf());
                Ok(MemoryReadSource::new(reads.clone()))
            },
            |output, title, panels, genes, layout| {
                rendered.push((output.to_path_buf(), title.map(String::from), panels.to_vec()));
                assert!(genes.is_empty());
                assert!(!layout.condensed);
                Ok(())
            },
        )
        .unwrap();

        assert_eq!(outputs, vec![PathBuf::from("plots/936-941.png")]);
        assert_eq!(opened, typhoon_config.inputs);
        assert_eq!(rendered.len(), 1);

        let (output, title, panels) = &rendered[0];
        assert_eq!(output, &typhoon_config.output);
        assert_eq!(title, &None);
        assert_eq!(panels.len(), 2);
        assert_eq!(panels[0].title.as_deref(), Some("DM936.bam"));
        assert_eq!(
            panels[0].x_desc.as_deref(),
            Some("Position on chromosome chrII (center: 1100)")
        );
        assert_eq!(panels[0].y_desc.as_deref(), Some(FRAGMENT_LENGTH_DESC));

        let matrix = &panels[0].matrix;
        assert_eq!(matrix.shape(), (251, 401));
        assert_eq!(matrix.ceiling(), 15);
        // negative and 400 bp fragments are dropped; the rest cover
        // [1030, 1120] and [1069, 1156]
        assert_eq!(matrix.total(), 91 + 88);
        assert_eq!(matrix.get(150, 1030), Some(1));
        assert_eq!(matrix.get(147, 1069), Some(1));
    }

    #[rstest]
    fn test_plot_typhoon_condensed(mut typhoon_config: PlotConfig, reads: Vec<ReadRecord>) {
        typhoon_config.condensed = true;
        typhoon_config.out_of_range = OutOfRangePolicy::Clamp;
        let mut titles = Vec::new();

        plot_typhoon(
            &typhoon_config,
            |_| Ok(MemoryReadSource::new(reads.clone())),
            |_, title, panels, _, layout| {
                titles.push(title.map(String::from));
                assert!(layout.condensed);
                assert!(panels.iter().all(|p| p.title.is_none() && p.x_desc.is_none()));
                // the 400 bp fragment lands on the top row
                assert!(panels[0].matrix.occupied_cells().any(|(row, _, _)| row == 250));
                Ok(())
            },
        )
        .unwrap();

        assert_eq!(titles, vec![Some("936-941.png".to_string())]);
    }

    #[rstest]
    fn test_plot_typhoon_with_genes(mut typhoon_config: PlotConfig) {
        let mut gene_file = tempfile::NamedTempFile::new().unwrap();
        writeln!(gene_file, "# name,strand,left,right\nPHO5,+,1000,1300").unwrap();
        typhoon_config.genes = Some(gene_file.path().to_path_buf());

        plot_typhoon(
            &typhoon_config,
            |_| Ok(MemoryReadSource::default()),
            |_, _, _, genes, _| {
                assert_eq!(genes.len(), 1);
                assert_eq!(genes[0].name, "PHO5");
                Ok(())
            },
        )
        .unwrap();
    }

    #[rstest]
    fn test_open_failure_is_fatal(typhoon_config: PlotConfig) {
        let res = plot_typhoon(
            &typhoon_config,
            |path| Err::<MemoryReadSource, _>(TyphoonError::MissingInputFile(path.to_path_buf())),
            |_, _, _, _, _| Ok(()),
        );
        assert!(matches!(res, Err(TyphoonError::MissingInputFile(_))));
    }

    #[fixture]
    fn windows_config() -> PlotConfig {
        let mut config = PlotConfig::new(
            PlotMode::Windows,
            "chrII",
            0,
            PathBuf::from("multiWindow_test.png"),
        );
        config.extent = Some(100);
        config.limit = Some(5000);
        config.inputs = vec![PathBuf::from("DM936.bam")];
        config
    }

    #[rstest]
    fn test_plot_windows_batches(windows_config: PlotConfig) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut opened = 0;

        let outputs = plot_windows(
            &windows_config,
            |_| {
                opened += 1;
                Ok(LoggedSource {
                    inner: MemoryReadSource::new(vec![ReadRecord::new(3010, 20)]),
                    events: events.clone(),
                })
            },
            |output, title, panels, _, layout| {
                assert_eq!(title, None);
                assert_eq!(layout.dpi, 100);
                assert!(panels.iter().all(|p| p.matrix.ceiling() == 30));
                events.borrow_mut().push(format!(
                    "render {} {}",
                    output.display(),
                    panels.len()
                ));
                Ok(())
            },
        )
        .unwrap();

        assert_eq!(opened, 1);
        assert_eq!(
            outputs,
            vec![
                PathBuf::from("multiWindow_test_1.png"),
                PathBuf::from("multiWindow_test_2.png")
            ]
        );

        let events = events.borrow();
        assert_eq!(events.len(), 52);
        assert_eq!(events[29], "fetch 2900");
        assert_eq!(events[30], "render multiWindow_test_1.png 30");
        assert_eq!(events[31], "fetch 3000");
        assert_eq!(events[51], "render multiWindow_test_2.png 20");
    }

    #[rstest]
    fn test_plot_windows_panel_labels(windows_config: PlotConfig) {
        let mut panels_seen = Vec::new();

        plot_windows(
            &windows_config,
            |_| Ok(MemoryReadSource::new(vec![ReadRecord::new(3010, 20)])),
            |_, _, panels, _, _| {
                panels_seen.extend(panels.iter().cloned());
                Ok(())
            },
        )
        .unwrap();

        assert_eq!(panels_seen.len(), 50);
        assert_eq!(panels_seen[30].x_desc.as_deref(), Some("Position from chrII:3000"));
        assert_eq!(panels_seen[30].y_desc.as_deref(), Some(FRAGMENT_LENGTH_DESC));
        assert_eq!(panels_seen[30].matrix.total(), 13);
        assert_eq!(panels_seen[31].matrix.total(), 0);
    }

    #[rstest]
    fn test_progress_message_counts_regions(windows_config: PlotConfig) {
        let windows = windows_config.windows().unwrap();
        let batches = plan_batches(&windows, 30).unwrap();

        assert_eq!(
            progress_message(&batches[0], 0, batches.len(), windows.len()),
            "file 1 of 2, region 1 of 50"
        );
        assert_eq!(
            progress_message(&batches[1], 19, batches.len(), windows.len()),
            "file 2 of 2, region 50 of 50"
        );
    }

    #[rstest]
    fn test_failed_batch_keeps_earlier_outputs(windows_config: PlotConfig) {
        let mut written = Vec::new();

        let res = plot_windows(
            &windows_config,
            |_| Ok(MemoryReadSource::default()),
            |output, _, _, _, _| {
                if written.is_empty() {
                    written.push(output.to_path_buf());
                    Ok(())
                } else {
                    Err(TyphoonError::Render("disk full".to_string()))
                }
            },
        );

        assert!(matches!(res, Err(TyphoonError::Render(_))));
        assert_eq!(written, vec![PathBuf::from("multiWindow_test_1.png")]);
    }

    #[rstest]
    fn test_plot_density(mut typhoon_config: PlotConfig, reads: Vec<ReadRecord>) {
        typhoon_config.mode = PlotMode::Density;
        typhoon_config.output = PathBuf::from("kde_936.png");
        let mut seen = Vec::new();

        plot_density(
            &typhoon_config,
            |_| Ok(MemoryReadSource::new(reads.clone())),
            |output, title, panels, _| {
                seen.push((output.to_path_buf(), title.map(String::from), panels.len()));
                let curve = &panels[0].curve;
                assert_eq!(curve.positions.first(), Some(&900));
                assert_eq!(curve.positions.len(), 14);
                assert_eq!(panels[0].title.as_deref(), Some("DM936.bam"));
                Ok(())
            },
        )
        .unwrap();

        assert_eq!(
            seen,
            vec![(PathBuf::from("kde_936.png"), Some("kde_936".to_string()), 2)]
        );
    }

    #[rstest]
    fn test_plot_density_title(mut typhoon_config: PlotConfig) {
        typhoon_config.mode = PlotMode::Density;
        typhoon_config.title = Some("DM936 - 430250".to_string());

        plot_density(
            &typhoon_config,
            |_| Ok(MemoryReadSource::default()),
            |_, title, _, _| {
                assert_eq!(title, Some("DM936 - 430250"));
                Ok(())
            },
        )
        .unwrap();
    }

    #[rstest]
    fn test_run_plot_validates_first(typhoon_config: PlotConfig) {
        let res = run_plot(&typhoon_config);
        assert!(matches!(res, Err(TyphoonError::MissingInputFile(_))));
    }
}
