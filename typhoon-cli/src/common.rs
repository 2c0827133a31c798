//! Arguments shared by the plotting subcommands.
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches};

use typhoon_core::{OutOfRangePolicy, PlotConfig, PlotMode};

pub fn required<'a, T: Clone + Send + Sync + 'static>(
    matches: &'a ArgMatches,
    id: &str,
) -> Result<&'a T> {
    matches
        .get_one::<T>(id)
        .with_context(|| format!("Missing required argument <{}>", id))
}

pub fn chrom_arg() -> Arg {
    Arg::new("chrom")
        .help("Chromosome name as it appears in the BAM header")
        .required(true)
}

pub fn origin_arg(help: &'static str) -> Arg {
    Arg::new("origin")
        .value_parser(clap::value_parser!(i64))
        .help(help)
        .required(true)
}

pub fn output_arg() -> Arg {
    Arg::new("output")
        .value_parser(clap::value_parser!(PathBuf))
        .help("Path of the PNG to write")
        .required(true)
}

pub fn dpi_arg() -> Arg {
    Arg::new("dpi")
        .long("dpi")
        .value_parser(clap::value_parser!(u32))
        .help("Resolution of the figure in dots per inch")
}

pub fn condensed_arg() -> Arg {
    Arg::new("condensed")
        .long("condensed")
        .short('c')
        .action(ArgAction::SetTrue)
        .help("Short panels without per-panel titles or axis labels")
}

pub fn binning_args() -> Vec<Arg> {
    vec![
        Arg::new("ceiling")
            .long("ceiling")
            .value_parser(clap::value_parser!(u32))
            .help("Saturation ceiling of every heatmap cell"),
        Arg::new("max-len")
            .long("max-len")
            .value_parser(clap::value_parser!(usize))
            .help("Longest template length given a heatmap row"),
        Arg::new("out-of-range")
            .long("out-of-range")
            .value_parser(["drop", "clamp"])
            .help("What to do with reads whose template length has no row [default: drop]"),
    ]
}

/// Positional arguments common to every plotting subcommand.
pub fn base_config(matches: &ArgMatches, mode: PlotMode) -> Result<PlotConfig> {
    let chrom = required::<String>(matches, "chrom")?;
    let origin = required::<i64>(matches, "origin")?;
    let output = required::<PathBuf>(matches, "output")?;

    let mut config = PlotConfig::new(mode, chrom, *origin, output.clone());
    config.dpi = matches.get_one::<u32>("dpi").copied();
    Ok(config)
}

pub fn apply_binning_args(matches: &ArgMatches, config: &mut PlotConfig) -> Result<()> {
    if let Some(ceiling) = matches.get_one::<u32>("ceiling") {
        config.ceiling = Some(*ceiling);
    }
    if let Some(max_len) = matches.get_one::<usize>("max-len") {
        config.max_len = *max_len;
    }
    if let Some(policy) = matches.get_one::<String>("out-of-range") {
        config.out_of_range = OutOfRangePolicy::from_str(policy).map_err(anyhow::Error::msg)?;
    }
    Ok(())
}

pub fn input_files(matches: &ArgMatches, id: &str) -> Vec<PathBuf> {
    matches
        .get_many::<PathBuf>(id)
        .map(|files| files.cloned().collect())
        .unwrap_or_default()
}
