use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use typhoon_core::{PlotConfig, PlotMode};
use typhoon_plot::run_plot;

use crate::common::{apply_binning_args, base_config, required};

pub fn windows_config(matches: &ArgMatches) -> Result<PlotConfig> {
    let mut config = base_config(matches, PlotMode::Windows)?;
    config.extent = Some(*required::<i64>(matches, "extent")?);
    config.limit = Some(*required::<i64>(matches, "limit")?);
    config.inputs = vec![required::<PathBuf>(matches, "file")?.clone()];
    config.condensed = matches.get_flag("condensed");
    if let Some(batch_size) = matches.get_one::<usize>("batch-size") {
        config.batch_size = *batch_size;
    }
    apply_binning_args(matches, &mut config)?;

    Ok(config)
}

pub fn run_windows(matches: &ArgMatches) -> Result<()> {
    let config = windows_config(matches)?;
    let outputs = run_plot(&config)
        .with_context(|| format!("Failed to plot windows of {:?}", config.inputs))?;
    info!("{} file(s) written", outputs.len());

    Ok(())
}
