use std::path::PathBuf;

use clap::{Arg, Command};

use crate::common::{chrom_arg, condensed_arg, dpi_arg, origin_arg, output_arg};

pub const DENSITY_CMD: &str = "density";

pub fn create_density_cli() -> Command {
    Command::new(DENSITY_CMD)
        .about("Plot a Gaussian kernel density of fragment midpoints around one locus, one panel per BAM file.")
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
        .arg(
            Arg::new("bandwidth")
                .long("bandwidth")
                .short('b')
                .value_parser(clap::value_parser!(i64))
                .help("Distance between density samples [default: 30]"),
        )
        .arg(
            Arg::new("kernel-sd")
                .long("kernel-sd")
                .value_parser(clap::value_parser!(f64))
                .help("Standard deviation of every kernel [default: 1.0]"),
        )
        .arg(
            Arg::new("title")
                .long("title")
                .short('t')
                .help("Figure title [default: output file stem]"),
        )
        .arg(condensed_arg())
        .arg(dpi_arg())
}
