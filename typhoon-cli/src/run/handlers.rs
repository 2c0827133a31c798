use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use typhoon_core::PlotConfig;
use typhoon_plot::run_plot;

use crate::common::required;

pub fn run_config_file(matches: &ArgMatches) -> Result<()> {
    let path = required::<PathBuf>(matches, "config")?;
    let config = PlotConfig::from_file(path)
        .with_context(|| format!("Failed to load run file {:?}", path))?;

    info!("Running {} plot from {:?}", config.mode, path);
    run_plot(&config).with_context(|| format!("Failed to run {:?}", path))?;

    Ok(())
}
