use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};

use crate::common::{binning_args, chrom_arg, condensed_arg, dpi_arg, origin_arg, output_arg};

pub const TYPHOON_CMD: &str = "typhoon";

pub fn create_typhoon_cli() -> Command {
    Command::new(TYPHOON_CMD)
        .about("Plot fragment length against position around one locus, one heatmap per BAM file.")
        .arg(chrom_arg())
        .arg(origin_arg("Center of the window"))
        .arg(
            Arg::new("offset")
                .value_parser(clap::value_parser!(i64))
                .help("Bases plotted on either side of the origin")
                .required(true),
        )
        .arg(output_arg())
        .arg(
            Arg::new("files")
                .value_parser(clap::value_parser!(PathBuf))
                .num_args(1..)
                .help("Indexed BAM files, one panel each")
                .required(true),
        )
        .arg(condensed_arg())
        .arg(
            Arg::new("genes")
                .long("genes")
                .short('g')
                .value_parser(clap::value_parser!(PathBuf))
                .help("Gene body file (name,strand,left,right) [default: genebodies.txt]"),
        )
        .args(binning_args())
        .arg(
            Arg::new("short-on-top")
                .long("short-on-top")
                .action(ArgAction::SetTrue)
                .help("Draw short fragments at the top of each panel"),
        )
        .arg(dpi_arg())
}
