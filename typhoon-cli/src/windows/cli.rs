use std::path::PathBuf;

use clap::{Arg, Command};

use crate::common::{binning_args, chrom_arg, condensed_arg, dpi_arg, origin_arg, output_arg};

pub const WINDOWS_CMD: &str = "windows";

pub fn create_windows_cli() -> Command {
    Command::new(WINDOWS_CMD)
        .about("Tile a chromosome into windows and plot one heatmap per window, split across several PNG files.")
        .arg(chrom_arg())
        .arg(origin_arg("Start of the first window"))
        .arg(
            Arg::new("extent")
                .value_parser(clap::value_parser!(i64))
                .help("Width of every window")
                .required(true),
        )
        .arg(
            Arg::new("limit")
                .value_parser(clap::value_parser!(i64))
                .help("Windows are added while their start is below this position")
                .required(true),
        )
        .arg(output_arg())
        .arg(
            Arg::new("file")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Indexed BAM file")
                .required(true),
        )
        .arg(
            Arg::new("batch-size")
                .long("batch-size")
                .value_parser(clap::value_parser!(usize))
                .help("Windows per output file [default: 30]"),
        )
        .arg(condensed_arg())
        .args(binning_args())
        .arg(dpi_arg())
}
