use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ArgMatches;

use typhoon_core::{PlotConfig, PlotMode};
use typhoon_plot::run_plot;

use crate::common::{apply_binning_args, base_config, input_files, required};

pub fn typhoon_config(matches: &ArgMatches) -> Result<PlotConfig> {
    let mut config = base_config(matches, PlotMode::Typhoon)?;
    config.offset = Some(*required::<i64>(matches, "offset")?);
    config.inputs = input_files(matches, "files");
    config.condensed = matches.get_flag("condensed");
    config.short_on_top = matches.get_flag("short-on-top");
    config.genes = matches.get_one::<PathBuf>("genes").cloned();
    apply_binning_args(matches, &mut config)?;

    Ok(config)
}

pub fn run_typhoon(matches: &ArgMatches) -> Result<()> {
    let config = typhoon_config(matches)?;
    run_plot(&config)
        .with_context(|| format!("Failed to draw typhoon plot {:?}", config.output))?;

    Ok(())
}
