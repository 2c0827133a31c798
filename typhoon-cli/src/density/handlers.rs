use anyhow::{Context, Result};
use clap::ArgMatches;

use typhoon_core::{PlotConfig, PlotMode};
use typhoon_plot::run_plot;

use crate::common::{base_config, input_files, required};

pub fn density_config(matches: &ArgMatches) -> Result<PlotConfig> {
    let mut config = base_config(matches, PlotMode::Density)?;
    config.offset = Some(*required::<i64>(matches, "offset")?);
    config.inputs = input_files(matches, "files");
    config.condensed = matches.get_flag("condensed");
    config.title = matches.get_one::<String>("title").cloned();
    if let Some(bandwidth) = matches.get_one::<i64>("bandwidth") {
        config.bandwidth = *bandwidth;
    }
    if let Some(kernel_sd) = matches.get_one::<f64>("kernel-sd") {
        config.kernel_sd = *kernel_sd;
    }

    Ok(config)
}

pub fn run_density(matches: &ArgMatches) -> Result<()> {
    let config = density_config(matches)?;
    run_plot(&config)
        .with_context(|| format!("Failed to draw density plot {:?}", config.output))?;

    Ok(())
}
