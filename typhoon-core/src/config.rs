//! Run configuration shared by every plotting mode.
//!
//! A [`PlotConfig`] is built either from command line arguments or from a
//! TOML run file, e.g.
//!
//! ```toml
//! mode = "typhoon"
//! chromosome = "tpg|BK006936.2|"
//! origin = 430250
//! offset = 2750
//! output = "936-941.png"
//! inputs = ["DM936.bam", "DM937.bam"]
//! condensed = true
//! ```
use std::fmt::{self, Display};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::consts::*;
use crate::errors::{Result, TyphoonError};
use crate::models::GenomicWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotMode {
    /// One heatmap per input file over a single window.
    #[default]
    Typhoon,
    /// One heatmap per window tiled along a chromosome, batched into files.
    Windows,
    /// One kernel density curve of fragment midpoints per input file.
    Density,
}

impl Display for PlotMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlotMode::Typhoon => "typhoon",
            PlotMode::Windows => "windows",
            PlotMode::Density => "density",
        };
        write!(f, "{}", name)
    }
}

/// What the binner does with a read whose template length has no heatmap row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutOfRangePolicy {
    #[default]
    Drop,
    Clamp,
}

impl FromStr for OutOfRangePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "drop" => Ok(OutOfRangePolicy::Drop),
            "clamp" => Ok(OutOfRangePolicy::Clamp),
            _ => Err(format!("Invalid out-of-range policy: {} (expected drop or clamp)", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlotConfig {
    #[serde(default)]
    pub mode: PlotMode,
    pub chromosome: String,
    pub origin: i64,
    /// Half width of the window (typhoon and density modes).
    pub offset: Option<i64>,
    /// Width of each tile (windows mode).
    pub extent: Option<i64>,
    /// Tiles are generated while their start is below this position (windows mode).
    pub limit: Option<i64>,
    pub output: PathBuf,
    pub inputs: Vec<PathBuf>,
    #[serde(default = "default_bandwidth")]
    pub bandwidth: i64,
    #[serde(default = "default_kernel_sd")]
    pub kernel_sd: f64,
    #[serde(default)]
    pub condensed: bool,
    pub ceiling: Option<u32>,
    #[serde(default = "default_max_len")]
    pub max_len: usize,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    pub genes: Option<PathBuf>,
    #[serde(default)]
    pub out_of_range: OutOfRangePolicy,
    #[serde(default)]
    pub short_on_top: bool,
    pub dpi: Option<u32>,
    pub title: Option<String>,
}

fn default_bandwidth() -> i64 {
    DEFAULT_BANDWIDTH
}

fn default_kernel_sd() -> f64 {
    DEFAULT_KERNEL_SD
}

fn default_max_len() -> usize {
    DEFAULT_MAX_LEN
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

impl PlotConfig {
    ///
    /// A configuration with every optional field at its default.
    ///
    pub fn new(mode: PlotMode, chromosome: &str, origin: i64, output: PathBuf) -> Self {
        PlotConfig {
            mode,
            chromosome: chromosome.to_string(),
            origin,
            offset: None,
            extent: None,
            limit: None,
            output,
            inputs: Vec::new(),
            bandwidth: DEFAULT_BANDWIDTH,
            kernel_sd: DEFAULT_KERNEL_SD,
            condensed: false,
            ceiling: None,
            max_len: DEFAULT_MAX_LEN,
            batch_size: DEFAULT_BATCH_SIZE,
            genes: None,
            out_of_range: OutOfRangePolicy::Drop,
            short_on_top: false,
            dpi: None,
            title: None,
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| TyphoonError::Config(e.to_string()))
    }

    ///
    /// Load a run file. Relative input, output and gene paths are resolved
    /// against the directory holding the run file.
    ///
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| TyphoonError::Config(format!("{:?}: {}", path, e)))?;
        let mut config = Self::from_toml_str(&contents)?;

        if let Some(base) = path.parent() {
            config.output = base.join(&config.output);
            config.inputs = config.inputs.iter().map(|p| base.join(p)).collect();
            config.genes = config.genes.as_ref().map(|p| base.join(p));
        }

        Ok(config)
    }

    /// Saturation ceiling, falling back to the mode's default.
    pub fn ceiling(&self) -> u32 {
        self.ceiling.unwrap_or(match self.mode {
            PlotMode::Windows => WINDOWS_CEILING,
            _ => TYPHOON_CEILING,
        })
    }

    pub fn dpi(&self) -> u32 {
        self.dpi.unwrap_or(match self.mode {
            PlotMode::Windows => WINDOWS_DPI,
            _ => FIGURE_DPI,
        })
    }

    /// Gene annotation file to overlay; typhoon mode falls back to `genebodies.txt`.
    pub fn gene_file(&self) -> Option<PathBuf> {
        match (&self.genes, self.mode) {
            (Some(path), _) => Some(path.clone()),
            (None, PlotMode::Typhoon) => Some(PathBuf::from(DEFAULT_GENE_FILE)),
            (None, _) => None,
        }
    }

    ///
    /// Windows to plot: a single window around `origin` for the typhoon and
    /// density modes, consecutive tiles for the windows mode.
    ///
    pub fn windows(&self) -> Result<Vec<GenomicWindow>> {
        match self.mode {
            PlotMode::Typhoon | PlotMode::Density => {
                let offset = self.offset.ok_or_else(|| {
                    TyphoonError::InvalidParameter(format!("{} mode requires an offset", self.mode))
                })?;
                Ok(vec![GenomicWindow::around(&self.chromosome, self.origin, offset)?])
            }
            PlotMode::Windows => {
                let (extent, limit) = match (self.extent, self.limit) {
                    (Some(extent), Some(limit)) => (extent, limit),
                    _ => {
                        return Err(TyphoonError::InvalidParameter(
                            "windows mode requires both an extent and a limit".to_string(),
                        ));
                    }
                };
                GenomicWindow::tile(&self.chromosome, self.origin, extent, limit)
            }
        }
    }

    ///
    /// Check every parameter before any input is opened.
    ///
    pub fn validate(&self) -> Result<()> {
        self.windows()?;

        if self.inputs.is_empty() {
            return Err(TyphoonError::InvalidParameter(
                "at least one input file is required".to_string(),
            ));
        }

        if self.mode == PlotMode::Windows && self.inputs.len() != 1 {
            return Err(TyphoonError::InvalidParameter(format!(
                "windows mode plots exactly one input file, got {}",
                self.inputs.len()
            )));
        }

        if self.bandwidth <= 0 {
            return Err(TyphoonError::InvalidParameter(format!(
                "bandwidth must be positive, got {}",
                self.bandwidth
            )));
        }

        if !(self.kernel_sd > 0.0 && self.kernel_sd.is_finite()) {
            return Err(TyphoonError::InvalidParameter(format!(
                "kernel standard deviation must be positive, got {}",
                self.kernel_sd
            )));
        }

        if self.ceiling() == 0 {
            return Err(TyphoonError::InvalidParameter(
                "saturation ceiling must be at least 1".to_string(),
            ));
        }

        if self.max_len == 0 {
            return Err(TyphoonError::InvalidParameter(
                "maximum fragment length must be at least 1".to_string(),
            ));
        }

        if self.batch_size == 0 {
            return Err(TyphoonError::InvalidParameter(
                "batch size must be at least 1".to_string(),
            ));
        }

        if self.dpi() == 0 {
            return Err(TyphoonError::InvalidParameter("dpi must be at least 1".to_string()));
        }

        for input in self.inputs.iter() {
            if !input.exists() {
                return Err(TyphoonError::MissingInputFile(input.clone()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[fixture]
    fn bam_file() -> NamedTempFile {
        NamedTempFile::new().unwrap()
    }

    #[fixture]
    fn typhoon_config(bam_file: NamedTempFile) -> (PlotConfig, NamedTempFile) {
        let mut config = PlotConfig::new(
            PlotMode::Typhoon,
            "chrII",
            430250,
            PathBuf::from("out.png"),
        );
        config.offset = Some(2750);
        config.inputs = vec![bam_file.path().to_path_buf()];
        (config, bam_file)
    }

    #[rstest]
    fn test_parse_toml_config() {
        let config = PlotConfig::from_toml_str(
            r#"
            mode = "windows"
            chromosome = "tpg|BK006936.2|"
            origin = 0
            extent = 10000
            limit = 500000
            output = "multiWindow_test.png"
            inputs = ["DM936.bam"]
            out_of_range = "clamp"
            "#,
        )
        .unwrap();

        assert_eq!(config.mode, PlotMode::Windows);
        assert_eq!(config.ceiling(), WINDOWS_CEILING);
        assert_eq!(config.dpi(), WINDOWS_DPI);
        assert_eq!(config.max_len, DEFAULT_MAX_LEN);
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(config.out_of_range, OutOfRangePolicy::Clamp);
        assert_eq!(config.gene_file(), None);
        assert_eq!(config.windows().unwrap().len(), 50);
    }

    #[rstest]
    fn test_unknown_field_is_rejected() {
        let res = PlotConfig::from_toml_str(
            r#"
            chromosome = "chrII"
            origin = 0
            offset = 10
            output = "out.png"
            inputs = []
            colour = "red"
            "#,
        );
        assert!(matches!(res, Err(TyphoonError::Config(_))));
    }

    #[rstest]
    fn test_from_file_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "chromosome = \"chrII\"\norigin = 500\noffset = 100\noutput = \"plots/out.png\"\ninputs = [\"a.bam\"]"
        )
        .unwrap();

        let config = PlotConfig::from_file(&path).unwrap();
        assert_eq!(config.mode, PlotMode::Typhoon);
        assert_eq!(config.output, dir.path().join("plots/out.png"));
        assert_eq!(config.inputs, vec![dir.path().join("a.bam")]);
        assert_eq!(config.gene_file(), Some(PathBuf::from(DEFAULT_GENE_FILE)));
    }

    #[rstest]
    fn test_validate_typhoon(typhoon_config: (PlotConfig, NamedTempFile)) {
        let (config, _bam) = typhoon_config;
        assert!(config.validate().is_ok());
        assert_eq!(config.ceiling(), TYPHOON_CEILING);
        assert_eq!(config.dpi(), FIGURE_DPI);
    }

    #[rstest]
    fn test_validate_missing_input(typhoon_config: (PlotConfig, NamedTempFile)) {
        let (mut config, _bam) = typhoon_config;
        config.inputs.push(PathBuf::from("missing/DM941.bam"));
        assert!(matches!(
            config.validate(),
            Err(TyphoonError::MissingInputFile(_))
        ));
    }

    #[rstest]
    fn test_validate_rejects_zero_bandwidth(typhoon_config: (PlotConfig, NamedTempFile)) {
        let (mut config, _bam) = typhoon_config;
        config.mode = PlotMode::Density;
        config.bandwidth = 0;
        assert!(matches!(
            config.validate(),
            Err(TyphoonError::InvalidParameter(_))
        ));
    }

    #[rstest]
    fn test_validate_windows_needs_single_input(typhoon_config: (PlotConfig, NamedTempFile)) {
        let (mut config, bam) = typhoon_config;
        config.mode = PlotMode::Windows;
        config.origin = 0;
        config.extent = Some(1000);
        config.limit = Some(5000);
        config.inputs = vec![bam.path().to_path_buf(), bam.path().to_path_buf()];
        assert!(matches!(
            config.validate(),
            Err(TyphoonError::InvalidParameter(_))
        ));

        config.inputs.pop();
        assert!(config.validate().is_ok());
    }

    #[rstest]
    fn test_missing_offset(typhoon_config: (PlotConfig, NamedTempFile)) {
        let (mut config, _bam) = typhoon_config;
        config.offset = None;
        assert!(matches!(
            config.windows(),
            Err(TyphoonError::InvalidParameter(_))
        ));
    }

    #[rstest]
    #[case("drop", OutOfRangePolicy::Drop)]
    #[case("CLAMP", OutOfRangePolicy::Clamp)]
    fn test_out_of_range_from_str(#[case] s: &str, #[case] expected: OutOfRangePolicy) {
        assert_eq!(s.parse::<OutOfRangePolicy>().unwrap(), expected);
    }
}
