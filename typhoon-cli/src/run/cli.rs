use std::path::PathBuf;

use clap::{Arg, Command};

pub const RUN_CMD: &str = "run";

pub fn create_run_cli() -> Command {
    Command::new(RUN_CMD)
        .about("Draw the plot described by a TOML run file.")
        .arg(
            Arg::new("config")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Run file; relative paths in it are resolved against its directory")
                .required(true),
        )
}
