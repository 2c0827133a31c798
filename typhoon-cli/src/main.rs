mod common;
mod density;
mod run;
mod typhoon;
mod windows;

use anyhow::Result;
use clap::Command;
use env_logger::Env;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "typhoon";
    pub const BIN_NAME: &str = "typhoon";
    pub const DEFAULT_LOG_FILTER: &str = "info";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Typhoon plots and midpoint density plots of paired-end fragment occupancy from indexed BAM files.")
        .subcommand_required(true)
        .subcommand(typhoon::cli::create_typhoon_cli())
        .subcommand(windows::cli::create_windows_cli())
        .subcommand(density::cli::create_density_cli())
        .subcommand(run::cli::create_run_cli())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or(consts::DEFAULT_LOG_FILTER))
        .init();

    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // SINGLE WINDOW TYPHOON PLOT
        //
        Some((typhoon::cli::TYPHOON_CMD, matches)) => {
            typhoon::handlers::run_typhoon(matches)?;
        }

        //
        // TILED WINDOWS
        //
        Some((windows::cli::WINDOWS_CMD, matches)) => {
            windows::handlers::run_windows(matches)?;
        }

        //
        // MIDPOINT DENSITY
        //
        Some((density::cli::DENSITY_CMD, matches)) => {
            density::handlers::run_density(matches)?;
        }

        //
        // RUN FILE
        //
        Some((run::cli::RUN_CMD, matches)) => {
            run::handlers::run_config_file(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
